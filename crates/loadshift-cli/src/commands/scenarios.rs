use anyhow::{Context, Result};
use loadshift_cli::cli::{OutputFormat, ScenariosCommands};
use loadshift_cli::summary::write_scenario_table;
use loadshift_io::{load_scenarios_from_path, ScenarioRecord};
use std::io;

pub fn handle(command: &ScenariosCommands) -> Result<()> {
    match command {
        ScenariosCommands::List { scenarios, format } => {
            let list = load_scenarios_from_path(scenarios)
                .with_context(|| format!("loading scenarios from '{}'", scenarios.display()))?;
            match format {
                OutputFormat::Table => write_scenario_table(io::stdout(), &list),
                OutputFormat::Json => {
                    let records: Vec<ScenarioRecord> = list.iter().map(ScenarioRecord::from).collect();
                    serde_json::to_writer_pretty(io::stdout(), &records)
                        .context("serializing scenario list to JSON")?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
