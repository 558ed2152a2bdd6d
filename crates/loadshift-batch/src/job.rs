use loadshift_core::{Scenario, ScenarioResult};
use serde::{Deserialize, Serialize};

/// One scenario queued for solving, tagged with the batch prefix.
#[derive(Debug, Clone)]
pub struct BatchJob<'a> {
    pub job_id: String,
    /// Position in the input list; results are reported in this order
    pub position: usize,
    pub scenario: &'a Scenario,
}

/// Per-job line of the batch manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJobRecord {
    pub job_id: String,
    pub scenario_id: String,
    /// Solver status label, or `"error"` when the solve could not be invoked
    pub status: String,
    pub objective: Option<f64>,
    pub iterations: Option<u32>,
    pub solve_time_ms: Option<f64>,
    pub error: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<String>,
}

impl BatchJobRecord {
    pub fn from_result(job: &BatchJob<'_>, result: &ScenarioResult) -> Self {
        Self {
            job_id: job.job_id.clone(),
            scenario_id: result.scenario_id.clone(),
            status: result.status.label().to_string(),
            objective: result.objective,
            iterations: Some(result.iterations),
            solve_time_ms: Some(result.solve_time_ms),
            error: None,
            artifacts: Vec::new(),
        }
    }

    pub fn from_failure(job: &BatchJob<'_>, message: &str) -> Self {
        Self {
            job_id: job.job_id.clone(),
            scenario_id: job.scenario.scenario_id.clone(),
            status: "error".to_string(),
            objective: None,
            iterations: None,
            solve_time_ms: None,
            error: Some(message.to_string()),
            artifacts: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == "error"
    }
}

/// A scenario whose model could not be built or solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFailure {
    pub scenario_id: String,
    pub message: String,
}

pub fn jobs_from_scenarios<'a>(scenarios: &'a [Scenario], prefix: &str) -> Vec<BatchJob<'a>> {
    scenarios
        .iter()
        .enumerate()
        .map(|(position, scenario)| BatchJob {
            job_id: format!("{prefix}:{}", scenario.scenario_id),
            position,
            scenario,
        })
        .collect()
}
