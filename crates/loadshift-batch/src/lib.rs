pub mod artifacts;
pub mod job;
pub mod manifest;
pub mod runner;

pub use artifacts::{artifact_stem, sanitize_name, write_scenario_artifacts, write_trajectory_csv};
pub use job::{jobs_from_scenarios, BatchJob, BatchJobRecord, ScenarioFailure};
pub use manifest::{load_batch_manifest, write_batch_manifest, BatchManifest};
pub use runner::{run_batch, BatchReport, BatchRunnerConfig, DEFAULT_MODEL_PREFIX};
