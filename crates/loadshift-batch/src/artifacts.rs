//! Per-scenario result files: trajectory CSV and charts.

use anyhow::{Context, Result};
use loadshift_core::{Scenario, SharedProfiles, Trajectories, HOURS};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Make a scenario id safe to embed in a file name.
pub fn sanitize_name(id: &str) -> String {
    id.replace(['/', '\\'], "_")
}

/// `{prefix}-scenario-{id}` with the id sanitized.
pub fn artifact_stem(prefix: &str, scenario_id: &str) -> String {
    format!("{prefix}-scenario-{}", sanitize_name(scenario_id))
}

#[derive(Serialize)]
struct TrajectoryRow {
    hour: usize,
    load: f64,
    pv_used: f64,
    pv_curtailed: f64,
    grid_import: f64,
    grid_export: f64,
    hourly_cost: f64,
    discomfort: f64,
    pv_production: f64,
    reference_load: f64,
    energy_price: f64,
}

/// Write one row per hour with every decision value and its inputs.
pub fn write_trajectory_csv(
    path: &Path,
    shared: &SharedProfiles,
    scenario: &Scenario,
    traj: &Trajectories,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating trajectory file '{}'", path.display()))?;
    for t in 0..HOURS {
        writer
            .serialize(TrajectoryRow {
                hour: t,
                load: traj.load[t],
                pv_used: traj.pv_used[t],
                pv_curtailed: traj.pv_curtailed[t],
                grid_import: traj.grid_import[t],
                grid_export: traj.grid_export[t],
                hourly_cost: traj.hourly_cost[t],
                discomfort: traj.discomfort[t],
                pv_production: shared.pv_production[t],
                reference_load: shared.reference_load[t],
                energy_price: scenario.energy_price[t],
            })
            .with_context(|| format!("writing trajectory row {t} to '{}'", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing trajectory file '{}'", path.display()))?;
    Ok(())
}

/// Write the CSV and, when `render_plots` is set, both charts into `dir`.
///
/// Every file is pushed onto `written` as soon as it exists, so a failure
/// part-way through still leaves the finished paths in `written`.
pub fn write_scenario_artifacts(
    dir: &Path,
    prefix: &str,
    shared: &SharedProfiles,
    scenario: &Scenario,
    traj: &Trajectories,
    render_plots: bool,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating results directory '{}'", dir.display()))?;
    let stem = artifact_stem(prefix, &scenario.scenario_id);

    let csv_path = dir.join(format!("{stem}-trajectories.csv"));
    write_trajectory_csv(&csv_path, shared, scenario, traj)?;
    debug!(path = %csv_path.display(), "wrote trajectories");
    written.push(csv_path);

    if render_plots {
        render_charts(dir, &stem, shared, scenario, traj, written)?;
    }
    Ok(())
}

#[cfg(feature = "plots")]
fn render_charts(
    dir: &Path,
    stem: &str,
    shared: &SharedProfiles,
    scenario: &Scenario,
    traj: &Trajectories,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    use loadshift_viz::{write_decision_variables, write_price_vs_grid, ScheduleChart};

    let chart = ScheduleChart {
        title: &scenario.scenario_id,
        trajectories: traj,
        pv_production: &shared.pv_production,
        reference_load: &shared.reference_load,
        energy_price: &scenario.energy_price,
    };
    let decisions = dir.join(format!("{stem}-AllDecisionVariables.svg"));
    write_decision_variables(&chart, &decisions)?;
    written.push(decisions);
    let price = dir.join(format!("{stem}-EnergyPriceVsGrid.svg"));
    write_price_vs_grid(&chart, &price)?;
    written.push(price);
    debug!(scenario = %scenario.scenario_id, "rendered charts");
    Ok(())
}

#[cfg(not(feature = "plots"))]
fn render_charts(
    _dir: &Path,
    _stem: &str,
    _shared: &SharedProfiles,
    scenario: &Scenario,
    _traj: &Trajectories,
    _written: &mut Vec<PathBuf>,
) -> Result<()> {
    debug!(scenario = %scenario.scenario_id, "built without chart support; skipping charts");
    Ok(())
}
