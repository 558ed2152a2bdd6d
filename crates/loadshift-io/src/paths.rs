use std::path::{Path, PathBuf};

/// Locations of the four input bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub appliance: PathBuf,
    pub pv_production: PathBuf,
    pub usage_preferences: PathBuf,
    pub scenarios: PathBuf,
}

impl InputPaths {
    /// Conventional layout of a data directory:
    ///
    /// ```text
    /// data/
    ///   scenarios.json
    ///   question_1b/
    ///     appliance_params.json
    ///     DER_production.json
    ///     usage_preferences.json
    /// ```
    pub fn from_data_dir(dir: &Path) -> Self {
        let question = dir.join("question_1b");
        Self {
            appliance: question.join("appliance_params.json"),
            pv_production: question.join("DER_production.json"),
            usage_preferences: question.join("usage_preferences.json"),
            scenarios: dir.join("scenarios.json"),
        }
    }
}
