//! Optional TOML configuration.
//!
//! Every section and field may be omitted; command-line flags override
//! whatever the file sets.
//!
//! ```toml
//! [inputs]
//! data_dir = "data"
//!
//! [model]
//! alpha = 10.0
//!
//! [solver]
//! backend = "clarabel"
//! max_iterations = 200
//!
//! [output]
//! results_dir = "results"
//! plots = true
//! prefix = "1b"
//! threads = 1
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use loadshift_algo::{ModelParameters, SolverSettings};
use loadshift_batch::DEFAULT_MODEL_PREFIX;
use loadshift_core::{LoadshiftError, LoadshiftResult};
use loadshift_io::InputPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::InputArgs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadshiftConfig {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub model: ModelParameters,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input bundle locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub data_dir: Option<PathBuf>,
    pub appliance: Option<PathBuf>,
    pub pv_production: Option<PathBuf>,
    pub usage_preferences: Option<PathBuf>,
    pub scenarios: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub backend: String,
    pub max_iterations: u32,
    /// Seconds; omitted means unlimited
    pub time_limit_seconds: Option<f64>,
    pub tolerance: f64,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let settings = SolverSettings::default();
        Self {
            backend: "clarabel".to_string(),
            max_iterations: settings.max_iterations,
            time_limit_seconds: settings.time_limit_seconds,
            tolerance: settings.tolerance,
            verbose: settings.verbose,
        }
    }
}

impl SolverConfig {
    pub fn settings(&self) -> SolverSettings {
        SolverSettings {
            max_iterations: self.max_iterations,
            time_limit_seconds: self.time_limit_seconds,
            tolerance: self.tolerance,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Results directory; nothing is written when absent
    pub results_dir: Option<PathBuf>,
    pub plots: bool,
    pub prefix: String,
    pub threads: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: None,
            plots: true,
            prefix: DEFAULT_MODEL_PREFIX.to_string(),
            threads: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> LoadshiftResult<tracing::Level> {
        self.level.parse().map_err(|_| {
            LoadshiftError::Config(format!("unknown log level '{}'", self.level))
        })
    }
}

/// Read `path`, or fall back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> LoadshiftResult<LoadshiftConfig> {
    let Some(path) = path else {
        return Ok(LoadshiftConfig::default());
    };
    let contents = fs::read_to_string(path).map_err(|err| {
        LoadshiftError::Config(format!("reading config '{}': {err}", path.display()))
    })?;
    parse_config(&contents)
        .map_err(|err| LoadshiftError::Config(format!("parsing config '{}': {err}", path.display())))
}

pub fn parse_config(contents: &str) -> LoadshiftResult<LoadshiftConfig> {
    toml::from_str(contents).map_err(|err| LoadshiftError::Config(err.to_string()))
}

/// Merge input flags over the `[inputs]` section.
///
/// A data directory provides defaults for all four bundles; explicit paths
/// win over it. Without a data directory all four paths must be given.
pub fn resolve_input_paths(args: &InputArgs, config: &InputsConfig) -> Result<InputPaths> {
    let data_dir = args.data_dir.as_ref().or(config.data_dir.as_ref());
    let base = data_dir.map(|dir| InputPaths::from_data_dir(dir));

    let pick = |flag: &Option<PathBuf>,
                configured: &Option<PathBuf>,
                from_dir: Option<&PathBuf>,
                name: &str|
     -> Result<PathBuf> {
        flag.clone()
            .or_else(|| configured.clone())
            .or_else(|| from_dir.cloned())
            .ok_or_else(|| anyhow!("no {name} input given; pass --data-dir or --{name}"))
    };

    Ok(InputPaths {
        appliance: pick(
            &args.appliance,
            &config.appliance,
            base.as_ref().map(|b| &b.appliance),
            "appliance",
        )?,
        pv_production: pick(
            &args.pv,
            &config.pv_production,
            base.as_ref().map(|b| &b.pv_production),
            "pv",
        )?,
        usage_preferences: pick(
            &args.usage,
            &config.usage_preferences,
            base.as_ref().map(|b| &b.usage_preferences),
            "usage",
        )?,
        scenarios: pick(
            &args.scenarios,
            &config.scenarios,
            base.as_ref().map(|b| &b.scenarios),
            "scenarios",
        )?,
    })
}
