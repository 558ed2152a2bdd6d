//! # loadshift-algo: schedule model and solver backends
//!
//! Builds one convex optimization model per scenario and solves it through a
//! pluggable backend.
//!
//! ## Architecture
//!
//! - **[`Model`]**: backend-neutral description (bounded variables, linear
//!   equalities, squared-deviation epigraphs, linear objective)
//! - **[`build_schedule_model`]**: the 24-hour load-scheduling formulation
//! - **[`SolverBackend`]**: the external solve capability; [`ClarabelBackend`]
//!   is the pure-Rust default
//! - **[`solve_scenario`]**: build → solve → [`loadshift_core::ScenarioResult`]
//!
//! ## Outcomes
//!
//! | backend status | result |
//! |----------------|--------|
//! | optimal | trajectories + objective |
//! | infeasible | no trajectories, objective absent |
//! | unbounded | no trajectories, objective absent |
//! | anything else | no trajectories, objective absent, warning logged |
//!
//! Only a model that cannot be built or a backend that cannot be invoked
//! produces a [`SolveError`].
//!
//! ## Example
//!
//! ```ignore
//! use loadshift_algo::{solve_scenario, ClarabelBackend, ModelParameters, SolverSettings};
//!
//! let result = solve_scenario(
//!     &ClarabelBackend,
//!     &inputs.shared,
//!     &inputs.scenarios[0],
//!     &ModelParameters::default(),
//!     &SolverSettings::default(),
//! )?;
//! println!("objective: {:?}", result.objective);
//! ```

pub mod backends;
pub mod error;
pub mod model;
pub mod schedule;
pub mod solve;

pub use backends::{
    backend_by_id, ClarabelBackend, SolveOutcome, SolverBackend, SolverSettings, BACKEND_IDS,
};
pub use error::SolveError;
pub use model::{EpigraphConstraint, LinearConstraint, LinearExpr, Model, VarId, Variable};
pub use schedule::{build_schedule_model, HourVars, ModelParameters, ScheduleModel, DEFAULT_ALPHA};
pub use solve::solve_scenario;
