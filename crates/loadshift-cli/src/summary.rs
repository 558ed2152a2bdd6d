//! Console rendering of batch results.

use anyhow::Result;
use loadshift_batch::{BatchReport, ScenarioFailure};
use loadshift_core::{Scenario, SummaryRow, SummaryTable};
use serde::Serialize;
use std::io::Write;
use tabwriter::TabWriter;

pub const SUMMARY_BANNER: &str = "===== RESULTS SUMMARY =====";
pub const NO_RESULTS: &str = "No results found.";

/// Banner plus `SCENARIO  STATUS  OBJECTIVE` table, or the "no results" line.
///
/// Solve failures and result files that could not be written follow the table.
pub fn write_summary_table<W: Write>(
    out: W,
    summary: Option<&SummaryTable>,
    failures: &[ScenarioFailure],
    artifact_errors: &[ScenarioFailure],
) -> Result<()> {
    let mut writer = TabWriter::new(out);
    writeln!(writer, "{SUMMARY_BANNER}")?;
    match summary {
        None => writeln!(writer, "{NO_RESULTS}")?,
        Some(table) => {
            writeln!(writer, "SCENARIO\tSTATUS\tOBJECTIVE")?;
            for row in table.rows() {
                writeln!(
                    writer,
                    "{}\t{}\t{}",
                    row.scenario_id,
                    row.status,
                    format_objective(row.objective)
                )?;
            }
        }
    }
    if !failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "FAILED\tERROR")?;
        for failure in failures {
            writeln!(writer, "{}\t{}", failure.scenario_id, failure.message)?;
        }
    }
    if !artifact_errors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "ARTIFACTS INCOMPLETE\tERROR")?;
        for failure in artifact_errors {
            writeln!(writer, "{}\t{}", failure.scenario_id, failure.message)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn format_objective(objective: Option<f64>) -> String {
    objective.map_or_else(|| "-".to_string(), |value| format!("{value:.3}"))
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    summary: Option<&'a [SummaryRow]>,
    failures: &'a [ScenarioFailure],
    artifact_errors: &'a [ScenarioFailure],
    manifest: Option<String>,
}

pub fn write_summary_json<W: Write>(mut out: W, report: &BatchReport) -> Result<()> {
    let doc = SummaryJson {
        summary: report.summary.as_ref().map(SummaryTable::rows),
        failures: &report.failures,
        artifact_errors: &report.artifact_errors,
        manifest: report
            .manifest_path
            .as_ref()
            .map(|p| p.display().to_string()),
    };
    serde_json::to_writer_pretty(&mut out, &doc)?;
    writeln!(out)?;
    Ok(())
}

/// One line per scenario with its grid caps, tariffs and price range.
pub fn write_scenario_table<W: Write>(out: W, scenarios: &[Scenario]) -> Result<()> {
    let mut writer = TabWriter::new(out);
    writeln!(
        writer,
        "SCENARIO\tMAX_IMPORT_KW\tMAX_EXPORT_KW\tIMPORT_TARIFF\tEXPORT_TARIFF\tPRICE_MIN\tPRICE_MAX"
    )?;
    for s in scenarios {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{:.3}\t{:.3}",
            s.scenario_id,
            s.max_import.value(),
            s.max_export.value(),
            s.import_tariff.value(),
            s.export_tariff.value(),
            s.energy_price.min(),
            s.energy_price.max()
        )?;
    }
    writer.flush()?;
    Ok(())
}
