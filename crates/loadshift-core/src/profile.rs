//! Fixed-horizon hourly profiles.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::{LoadshiftError, LoadshiftResult};

/// Number of time steps in a scheduling horizon (one per hour of a day).
pub const HOURS: usize = 24;

/// A sequence of exactly [`HOURS`] values, one per hour.
///
/// The length is checked once at construction, so model builders can index
/// any hour in `0..HOURS` without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HourlyProfile(Vec<f64>);

impl HourlyProfile {
    /// Build a profile, rejecting anything that is not exactly 24 entries long.
    pub fn new(values: Vec<f64>) -> LoadshiftResult<Self> {
        if values.len() != HOURS {
            return Err(LoadshiftError::malformed(format!(
                "hourly profile must have exactly {HOURS} entries, found {}",
                values.len()
            )));
        }
        Ok(Self(values))
    }

    pub fn constant(value: f64) -> Self {
        Self(vec![value; HOURS])
    }

    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self((0..HOURS).map(f).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Index<usize> for HourlyProfile {
    type Output = f64;

    fn index(&self, hour: usize) -> &Self::Output {
        &self.0[hour]
    }
}

impl TryFrom<Vec<f64>> for HourlyProfile {
    type Error = LoadshiftError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<HourlyProfile> for Vec<f64> {
    fn from(profile: HourlyProfile) -> Self {
        profile.0
    }
}
