//! Per-scenario solve: build the schedule model, hand it to a backend and
//! turn the outcome into a [`ScenarioResult`].

use loadshift_core::{Scenario, ScenarioResult, SharedProfiles, SolveStatus};
use tracing::{debug, info, warn};

use crate::backends::{SolverBackend, SolverSettings};
use crate::error::SolveError;
use crate::schedule::{build_schedule_model, ModelParameters};

/// Solve one scenario.
///
/// Infeasible, unbounded and unfinished solves come back as `Ok` with an
/// absent objective. `Err` is reserved for models that could not be built or
/// solvers that could not be invoked.
pub fn solve_scenario(
    backend: &dyn SolverBackend,
    shared: &SharedProfiles,
    scenario: &Scenario,
    params: &ModelParameters,
    settings: &SolverSettings,
) -> Result<ScenarioResult, SolveError> {
    let schedule = build_schedule_model(shared, scenario, params)?;
    debug!(
        scenario = %scenario.scenario_id,
        backend = backend.id(),
        variables = schedule.model.num_variables(),
        "solving schedule model"
    );
    let outcome = backend.solve(&schedule.model, settings)?;
    let id = scenario.scenario_id.as_str();

    match (&outcome.status, outcome.objective) {
        (SolveStatus::Optimal, Some(objective)) => {
            if outcome.values.len() != schedule.model.num_variables() {
                return Err(SolveError::Backend {
                    backend: backend.id().to_string(),
                    message: format!(
                        "returned {} values for {} variables",
                        outcome.values.len(),
                        schedule.model.num_variables()
                    ),
                });
            }
            info!("Optimization {id} successful! Objective = {objective:.3}");
            debug!(
                scenario = id,
                max_violation = schedule.model.max_violation(&outcome.values),
                iterations = outcome.iterations,
                "optimal assignment"
            );
            Ok(ScenarioResult::optimal(
                id,
                schedule.trajectories(&outcome.values),
                objective,
                outcome.iterations,
                outcome.solve_time_ms,
            ))
        }
        (SolveStatus::Optimal, None) => Err(SolveError::Backend {
            backend: backend.id().to_string(),
            message: "reported an optimal status without an objective".into(),
        }),
        (status, _) => {
            match status {
                SolveStatus::Infeasible => warn!("Model {id} is infeasible."),
                SolveStatus::Unbounded => warn!("Model {id} is unbounded."),
                other => warn!(scenario = id, "Optimization ended with status: {other}"),
            }
            Ok(ScenarioResult::without_solution(
                id,
                status.clone(),
                outcome.iterations,
                outcome.solve_time_ms,
            ))
        }
    }
}
