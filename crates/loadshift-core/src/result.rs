//! Per-scenario solve results and the cross-scenario summary table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profile::HourlyProfile;

/// Outcome class reported by a solver backend.
///
/// Only `Optimal` carries an assignment. The other variants are expected
/// business outcomes, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Any other terminal state (iteration limit, numerical trouble, ...)
    Other(String),
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    pub fn label(&self) -> &str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Other(detail) => detail,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hour-by-hour decision values of an optimal schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectories {
    /// Scheduled load `L_t`
    pub load: HourlyProfile,
    /// PV used directly `u_t`
    pub pv_used: HourlyProfile,
    /// PV curtailed `c_t`
    pub pv_curtailed: HourlyProfile,
    /// Grid import `g_imp_t`
    pub grid_import: HourlyProfile,
    /// Grid export `g_exp_t`
    pub grid_export: HourlyProfile,
    /// Net hourly cost `HC_t`
    pub hourly_cost: HourlyProfile,
    /// Discomfort `D_t`
    pub discomfort: HourlyProfile,
}

/// Result of solving one scenario. Created once after the solve, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_id: String,
    pub status: SolveStatus,
    /// Present only when `status` is optimal
    pub trajectories: Option<Trajectories>,
    /// Present only when `status` is optimal
    pub objective: Option<f64>,
    pub iterations: u32,
    pub solve_time_ms: f64,
}

impl ScenarioResult {
    pub fn optimal(
        scenario_id: impl Into<String>,
        trajectories: Trajectories,
        objective: f64,
        iterations: u32,
        solve_time_ms: f64,
    ) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            status: SolveStatus::Optimal,
            trajectories: Some(trajectories),
            objective: Some(objective),
            iterations,
            solve_time_ms,
        }
    }

    /// A result for a solve that ended without an assignment.
    pub fn without_solution(
        scenario_id: impl Into<String>,
        status: SolveStatus,
        iterations: u32,
        solve_time_ms: f64,
    ) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            status,
            trajectories: None,
            objective: None,
            iterations,
            solve_time_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub scenario_id: String,
    pub status: SolveStatus,
    pub objective: Option<f64>,
}

/// Ordered `(scenario_id, objective)` rows, one per solved scenario.
///
/// Built incrementally while scenarios run; [`SummaryTable::finish`] turns an
/// empty table into `None` so callers report "no results" instead of printing
/// an empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: &ScenarioResult) {
        self.rows.push(SummaryRow {
            scenario_id: result.scenario_id.clone(),
            status: result.status.clone(),
            objective: result.objective,
        });
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn finish(self) -> Option<Self> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
