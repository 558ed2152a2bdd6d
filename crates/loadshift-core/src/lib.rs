//! # loadshift-core: scheduling data model
//!
//! Shared types for the loadshift workspace:
//!
//! - [`HourlyProfile`]: a 24-entry per-hour sequence, length checked at construction
//! - [`Scenario`], [`SharedProfiles`], [`InputBundle`]: loader output
//! - [`ScenarioResult`], [`SummaryTable`]: solver output and aggregation
//! - [`LoadshiftError`]: the error taxonomy used at crate boundaries
//! - [`units`]: newtype wrappers for kWh, kW and prices

pub mod error;
pub mod profile;
pub mod result;
pub mod scenario;
pub mod units;

pub use error::{LoadshiftError, LoadshiftResult};
pub use profile::{HourlyProfile, HOURS};
pub use result::{ScenarioResult, SolveStatus, SummaryRow, SummaryTable, Trajectories};
pub use scenario::{ApplianceProfile, InputBundle, Scenario, SharedProfiles};
pub use units::{CurrencyPerKwh, KilowattHours, Kilowatts};
