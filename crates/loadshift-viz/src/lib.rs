//! SVG charts for optimal schedules.
//!
//! Two charts per scenario:
//! - [`decision_variables_svg`]: load, PV use/curtailment, grid flows, PV
//!   production and reference load over the day
//! - [`price_vs_grid_svg`]: energy price on the left axis against grid
//!   import/export on the right axis
//!
//! Layout is cosmetic; only the file format (SVG) is stable.

use std::error::Error;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use loadshift_core::{HourlyProfile, Trajectories, HOURS};
use plotters::prelude::*;

/// Default canvas size in pixels.
pub const CHART_SIZE: (u32, u32) = (1024, 600);

const HOUR_RANGE: std::ops::Range<f64> = 0.0..(HOURS - 1) as f64;

/// Everything a chart needs about one solved scenario.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleChart<'a> {
    pub title: &'a str,
    pub trajectories: &'a Trajectories,
    pub pv_production: &'a HourlyProfile,
    pub reference_load: &'a HourlyProfile,
    pub energy_price: &'a HourlyProfile,
}

/// Render all decision variables plus PV production and reference load.
pub fn decision_variables_svg(
    chart: &ScheduleChart<'_>,
    size: (u32, u32),
) -> Result<String, Box<dyn Error>> {
    let traj = chart.trajectories;
    let series: [(&str, &HourlyProfile, RGBColor); 7] = [
        ("Lt", &traj.load, RGBColor(31, 119, 180)),
        ("ut", &traj.pv_used, RGBColor(255, 127, 14)),
        ("ct", &traj.pv_curtailed, RGBColor(44, 160, 44)),
        ("gt_imp", &traj.grid_import, RGBColor(214, 39, 40)),
        ("gt_exp", &traj.grid_export, RGBColor(148, 103, 189)),
        ("PV production", chart.pv_production, RGBColor(140, 86, 75)),
        ("Reference load", chart.reference_load, RGBColor(127, 127, 127)),
    ];
    let (y_min, y_max) = padded_range(series.iter().map(|(_, p, _)| *p));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(
                format!("Decision variables: {}", chart.title),
                ("sans-serif", 20),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(HOUR_RANGE, y_min..y_max)?;

        ctx.configure_mesh()
            .x_desc("Hour")
            .y_desc("Energy (kWh)")
            .x_labels(HOURS)
            .draw()?;

        for (label, profile, color) in series {
            ctx.draw_series(LineSeries::new(points(profile), color.stroke_width(2)))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
    }
    Ok(svg)
}

/// Render energy price against grid import and export.
pub fn price_vs_grid_svg(
    chart: &ScheduleChart<'_>,
    size: (u32, u32),
) -> Result<String, Box<dyn Error>> {
    let traj = chart.trajectories;
    let (price_min, price_max) = padded_range([chart.energy_price]);
    let (grid_min, grid_max) = padded_range([&traj.grid_import, &traj.grid_export]);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(
                format!("Energy price vs grid: {}", chart.title),
                ("sans-serif", 20),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .right_y_label_area_size(60)
            .build_cartesian_2d(HOUR_RANGE, price_min..price_max)?
            .set_secondary_coord(HOUR_RANGE, grid_min..grid_max);

        ctx.configure_mesh()
            .x_desc("Hour")
            .y_desc("Energy price (DKK/kWh)")
            .x_labels(HOURS)
            .draw()?;
        ctx.configure_secondary_axes()
            .y_desc("Grid energy (kWh)")
            .draw()?;

        let price_color = RGBColor(31, 119, 180);
        ctx.draw_series(LineSeries::new(
            points(chart.energy_price),
            price_color.stroke_width(2),
        ))?
        .label("Energy price")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &price_color));

        for (label, profile, color) in [
            ("gt_imp", &traj.grid_import, RGBColor(214, 39, 40)),
            ("gt_exp", &traj.grid_export, RGBColor(44, 160, 44)),
        ] {
            ctx.draw_secondary_series(LineSeries::new(points(profile), color.stroke_width(2)))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
    }
    Ok(svg)
}

/// Write [`decision_variables_svg`] to `path`.
pub fn write_decision_variables(chart: &ScheduleChart<'_>, path: &Path) -> Result<()> {
    let svg = decision_variables_svg(chart, CHART_SIZE)
        .map_err(|e| anyhow!("rendering decision-variable chart: {e}"))?;
    write_svg(path, &svg)
}

/// Write [`price_vs_grid_svg`] to `path`.
pub fn write_price_vs_grid(chart: &ScheduleChart<'_>, path: &Path) -> Result<()> {
    let svg = price_vs_grid_svg(chart, CHART_SIZE)
        .map_err(|e| anyhow!("rendering price/grid chart: {e}"))?;
    write_svg(path, &svg)
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating chart directory '{}'", parent.display()))?;
    }
    fs::write(path, svg).with_context(|| format!("writing chart '{}'", path.display()))
}

fn points(profile: &HourlyProfile) -> impl Iterator<Item = (f64, f64)> + '_ {
    profile.iter().enumerate().map(|(t, v)| (t as f64, v))
}

/// Value range over several profiles with 10% headroom; never empty.
fn padded_range<'a>(profiles: impl IntoIterator<Item = &'a HourlyProfile>) -> (f64, f64) {
    let (lo, hi) = profiles
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.min()), hi.max(p.max()))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let lo = lo.min(0.0);
    let span = (hi - lo).max(1e-3);
    (lo - span * 0.05, hi + span * 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_includes_zero_and_pads() {
        let p = HourlyProfile::from_fn(|t| t as f64);
        let (lo, hi) = padded_range([&p]);
        assert!(lo < 0.0);
        assert!(hi > 23.0);
    }

    #[test]
    fn flat_zero_profile_still_has_a_span() {
        let p = HourlyProfile::constant(0.0);
        let (lo, hi) = padded_range([&p]);
        assert!(hi > lo);
    }

    #[test]
    fn negative_prices_extend_below_zero() {
        let p = HourlyProfile::from_fn(|t| if t == 12 { -0.5 } else { 1.0 });
        let (lo, _) = padded_range([&p]);
        assert!(lo < -0.5);
    }
}
