//! Solver backends.
//!
//! A backend is the external solve capability: it takes a [`Model`] and
//! returns an assignment with a status. Everything the pipeline knows about
//! a solver goes through the [`SolverBackend`] trait, so tests can substitute
//! scripted backends and other solvers can be added without touching the
//! model builder.

pub mod clarabel;

use loadshift_core::SolveStatus;
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::model::Model;

pub use self::clarabel::ClarabelBackend;

/// Settings passed to backend solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Maximum interior-point iterations
    pub max_iterations: u32,
    /// Wall-clock limit; `None` means unlimited
    pub time_limit_seconds: Option<f64>,
    /// Feasibility and duality-gap tolerance
    pub tolerance: f64,
    /// Let the backend print its own progress
    pub verbose: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            time_limit_seconds: None,
            tolerance: 1e-8,
            verbose: false,
        }
    }
}

/// What a backend returns for a model it could attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// One value per model variable; empty unless optimal
    pub values: Vec<f64>,
    /// Objective at `values`; `None` unless optimal
    pub objective: Option<f64>,
    pub iterations: u32,
    pub solve_time_ms: f64,
}

impl SolveOutcome {
    pub fn optimal(values: Vec<f64>, objective: f64, iterations: u32, solve_time_ms: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            objective: Some(objective),
            iterations,
            solve_time_ms,
        }
    }

    pub fn without_solution(status: SolveStatus, iterations: u32, solve_time_ms: f64) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            iterations,
            solve_time_ms,
        }
    }
}

/// The external solve capability.
pub trait SolverBackend: Send + Sync {
    /// Unique identifier (e.g., "clarabel")
    fn id(&self) -> &str;

    /// Check if this backend is available at runtime
    fn is_available(&self) -> bool {
        true
    }

    /// Solve `model` (minimization).
    ///
    /// Infeasible, unbounded or otherwise unfinished solves return `Ok` with
    /// the matching status. `Err` means the solve could not be attempted.
    fn solve(&self, model: &Model, settings: &SolverSettings) -> Result<SolveOutcome, SolveError>;
}

/// Identifiers accepted by [`backend_by_id`].
pub const BACKEND_IDS: &[&str] = &["clarabel"];

/// Look up a backend by its identifier.
pub fn backend_by_id(id: &str) -> Result<Box<dyn SolverBackend>, SolveError> {
    match id.to_ascii_lowercase().as_str() {
        "clarabel" => Ok(Box::new(ClarabelBackend)),
        _ => Err(SolveError::UnknownBackend(id.to_string())),
    }
}
