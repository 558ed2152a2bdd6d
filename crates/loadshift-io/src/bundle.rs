//! Parsers for the shared input bundles (appliance, PV production, usage preferences).
//!
//! Each bundle is a JSON document of which only one path is read:
//!
//! | bundle | path |
//! |--------|------|
//! | appliance parameters | `load[0].max_load_kWh_per_hour` |
//! | PV production | `[0].hourly_profile_ratio` |
//! | usage preferences | `[0].load_preferences[0].hourly_profile_ratio` |
//!
//! Unknown fields are ignored. Values are not sign-checked.

use loadshift_core::{
    ApplianceProfile, HourlyProfile, KilowattHours, LoadshiftError, LoadshiftResult,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApplianceParams {
    load: Vec<LoadParams>,
}

#[derive(Debug, Deserialize)]
struct LoadParams {
    #[serde(rename = "max_load_kWh_per_hour")]
    max_load: f64,
    #[serde(rename = "min_load_kWh_per_hour", default)]
    min_load: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    hourly_profile_ratio: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct UsagePreference {
    load_preferences: Vec<ProfileEntry>,
}

pub fn parse_appliance(text: &str) -> LoadshiftResult<ApplianceProfile> {
    let params: ApplianceParams = serde_json::from_str(text)
        .map_err(|e| LoadshiftError::malformed(format!("appliance parameters: {e}")))?;
    let load = params
        .load
        .first()
        .ok_or_else(|| LoadshiftError::malformed("appliance parameters: `load` is empty"))?;
    let mut appliance = ApplianceProfile::new(KilowattHours(load.max_load));
    if let Some(min_load) = load.min_load {
        appliance = appliance.with_min_load(KilowattHours(min_load));
    }
    Ok(appliance)
}

pub fn parse_pv_production(text: &str) -> LoadshiftResult<HourlyProfile> {
    let entries: Vec<ProfileEntry> = serde_json::from_str(text)
        .map_err(|e| LoadshiftError::malformed(format!("PV production: {e}")))?;
    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| LoadshiftError::malformed("PV production: no entries"))?;
    profile_with_context("PV production", entry.hourly_profile_ratio)
}

pub fn parse_usage_preferences(text: &str) -> LoadshiftResult<HourlyProfile> {
    let entries: Vec<UsagePreference> = serde_json::from_str(text)
        .map_err(|e| LoadshiftError::malformed(format!("usage preferences: {e}")))?;
    let entry = entries
        .into_iter()
        .next()
        .and_then(|usage| usage.load_preferences.into_iter().next())
        .ok_or_else(|| {
            LoadshiftError::malformed("usage preferences: no load preference entries")
        })?;
    profile_with_context("usage preferences", entry.hourly_profile_ratio)
}

pub(crate) fn profile_with_context(what: &str, values: Vec<f64>) -> LoadshiftResult<HourlyProfile> {
    HourlyProfile::new(values).map_err(|e| LoadshiftError::malformed(format!("{what}: {e}")))
}
