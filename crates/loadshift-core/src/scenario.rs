use serde::{Deserialize, Serialize};

use crate::profile::HourlyProfile;
use crate::units::{CurrencyPerKwh, KilowattHours, Kilowatts};

/// Per-hour load limits of the controllable appliance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplianceProfile {
    pub min_load: KilowattHours,
    pub max_load: KilowattHours,
}

impl ApplianceProfile {
    pub fn new(max_load: KilowattHours) -> Self {
        Self {
            min_load: KilowattHours(0.0),
            max_load,
        }
    }

    pub fn with_min_load(mut self, min_load: KilowattHours) -> Self {
        self.min_load = min_load;
        self
    }
}

/// Profiles shared read-only by every scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedProfiles {
    pub appliance: ApplianceProfile,
    /// Available PV production per hour
    pub pv_production: HourlyProfile,
    /// Preferred consumption per hour, only used as a penalty target
    pub reference_load: HourlyProfile,
}

/// One independent set of price, tariff and grid-capacity parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub energy_price: HourlyProfile,
    pub max_import: Kilowatts,
    pub max_export: Kilowatts,
    pub import_tariff: CurrencyPerKwh,
    pub export_tariff: CurrencyPerKwh,
}

impl Scenario {
    /// Cost of one imported kWh in `hour`: market price plus import tariff.
    pub fn import_cost(&self, hour: usize) -> f64 {
        self.energy_price[hour] + self.import_tariff.value()
    }

    /// Revenue of one exported kWh in `hour`: market price minus export tariff.
    pub fn export_revenue(&self, hour: usize) -> f64 {
        self.energy_price[hour] - self.export_tariff.value()
    }
}

/// Everything the loader produces: shared profiles plus the ordered scenario list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBundle {
    pub shared: SharedProfiles,
    pub scenarios: Vec<Scenario>,
}
