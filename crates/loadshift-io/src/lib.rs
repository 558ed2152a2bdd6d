//! Input bundle loading for the scheduling pipeline.
//!
//! [`load_inputs`] reads the four bundles named by [`InputPaths`] and returns
//! an [`InputBundle`]. Any missing field or profile that is not 24 entries
//! long fails with [`LoadshiftError::MalformedInput`] before a single scenario
//! is run.

pub mod bundle;
pub mod paths;
pub mod scenarios;

use loadshift_core::{InputBundle, LoadshiftError, LoadshiftResult, SharedProfiles};
use std::fs;
use std::path::Path;
use tracing::debug;

pub use bundle::{parse_appliance, parse_pv_production, parse_usage_preferences};
pub use paths::InputPaths;
pub use scenarios::{
    load_scenarios_from_path, parse_scenarios_json, parse_scenarios_yaml, ScenarioRecord,
};

/// Load and normalize every input bundle.
pub fn load_inputs(paths: &InputPaths) -> LoadshiftResult<InputBundle> {
    let shared = load_shared_profiles(paths)?;
    let scenarios = load_scenarios_from_path(&paths.scenarios)?;
    debug!(
        scenarios = scenarios.len(),
        path = %paths.scenarios.display(),
        "loaded scenario list"
    );
    Ok(InputBundle { shared, scenarios })
}

pub fn load_shared_profiles(paths: &InputPaths) -> LoadshiftResult<SharedProfiles> {
    let appliance = parse_appliance(&read_bundle(&paths.appliance)?)?;
    let pv_production = parse_pv_production(&read_bundle(&paths.pv_production)?)?;
    let reference_load = parse_usage_preferences(&read_bundle(&paths.usage_preferences)?)?;
    Ok(SharedProfiles {
        appliance,
        pv_production,
        reference_load,
    })
}

pub(crate) fn read_bundle(path: &Path) -> LoadshiftResult<String> {
    fs::read_to_string(path).map_err(|err| {
        LoadshiftError::Io(std::io::Error::new(
            err.kind(),
            format!("reading '{}': {err}", path.display()),
        ))
    })
}
