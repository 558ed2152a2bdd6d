//! Scenario list loading.
//!
//! A scenario list is a sequence of records, each carrying its own price
//! curve, tariffs and grid caps:
//!
//! ```json
//! [{
//!   "scenario": "winter-peak",
//!   "energy_price_DKK_per_kWh": [0.8, ...],
//!   "max_import_kW": 5.0,
//!   "max_export_kW": 3.0,
//!   "import_tariff_DKK/kWh": 0.6,
//!   "export_tariff_DKK/kWh": 0.1
//! }]
//! ```
//!
//! Lists may also be written in YAML with the same keys.

use loadshift_core::{CurrencyPerKwh, Kilowatts, LoadshiftError, LoadshiftResult, Scenario};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bundle::profile_with_context;
use crate::read_bundle;

/// A scenario record as it appears on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub scenario: String,
    #[serde(rename = "energy_price_DKK_per_kWh", alias = "energy_price")]
    pub energy_price: Vec<f64>,
    #[serde(rename = "max_import_kW")]
    pub max_import_kw: f64,
    #[serde(rename = "max_export_kW")]
    pub max_export_kw: f64,
    #[serde(rename = "import_tariff_DKK/kWh", alias = "import_tariff/kWh")]
    pub import_tariff: f64,
    #[serde(rename = "export_tariff_DKK/kWh", alias = "export_tariff/kWh")]
    pub export_tariff: f64,
}

impl ScenarioRecord {
    pub fn into_scenario(self) -> LoadshiftResult<Scenario> {
        let energy_price = profile_with_context(
            &format!("scenario '{}' energy price", self.scenario),
            self.energy_price,
        )?;
        Ok(Scenario {
            scenario_id: self.scenario,
            energy_price,
            max_import: Kilowatts(self.max_import_kw),
            max_export: Kilowatts(self.max_export_kw),
            import_tariff: CurrencyPerKwh(self.import_tariff),
            export_tariff: CurrencyPerKwh(self.export_tariff),
        })
    }
}

pub fn parse_scenarios_json(text: &str) -> LoadshiftResult<Vec<Scenario>> {
    let records: Vec<ScenarioRecord> = serde_json::from_str(text)
        .map_err(|e| LoadshiftError::malformed(format!("scenario list: {e}")))?;
    into_scenarios(records)
}

pub fn parse_scenarios_yaml(text: &str) -> LoadshiftResult<Vec<Scenario>> {
    let records: Vec<ScenarioRecord> = serde_yaml::from_str(text)
        .map_err(|e| LoadshiftError::malformed(format!("scenario list: {e}")))?;
    into_scenarios(records)
}

/// Load a scenario list, picking the format from the file extension.
///
/// Unknown extensions try YAML first, then JSON.
pub fn load_scenarios_from_path(path: &Path) -> LoadshiftResult<Vec<Scenario>> {
    let data = read_bundle(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            parse_scenarios_yaml(&data)
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_scenarios_json(&data),
        _ => parse_scenarios_yaml(&data).or_else(|_| parse_scenarios_json(&data)),
    }
}

impl From<&Scenario> for ScenarioRecord {
    fn from(scenario: &Scenario) -> Self {
        Self {
            scenario: scenario.scenario_id.clone(),
            energy_price: scenario.energy_price.values().to_vec(),
            max_import_kw: scenario.max_import.value(),
            max_export_kw: scenario.max_export.value(),
            import_tariff: scenario.import_tariff.value(),
            export_tariff: scenario.export_tariff.value(),
        }
    }
}

fn into_scenarios(records: Vec<ScenarioRecord>) -> LoadshiftResult<Vec<Scenario>> {
    records
        .into_iter()
        .map(ScenarioRecord::into_scenario)
        .collect()
}
