use anyhow::{Context, Result};
use loadshift_algo::{backend_by_id, ModelParameters};
use loadshift_batch::{run_batch, BatchRunnerConfig};
use loadshift_cli::cli::{OutputFormat, RunArgs};
use loadshift_cli::config::{resolve_input_paths, LoadshiftConfig};
use loadshift_cli::summary::{write_summary_json, write_summary_table};
use loadshift_io::load_inputs;
use std::io;
use tracing::info;

pub fn handle(args: &RunArgs, config: &LoadshiftConfig) -> Result<()> {
    let paths = resolve_input_paths(&args.inputs, &config.inputs)?;
    let inputs = load_inputs(&paths).context("loading input bundles")?;
    info!(
        scenarios = inputs.scenarios.len(),
        "loaded inputs from {}",
        paths.scenarios.display()
    );

    let backend_id = args.solver.as_deref().unwrap_or(&config.solver.backend);
    let backend = backend_by_id(backend_id)?;
    if !backend.is_available() {
        anyhow::bail!("solver backend '{}' is not available", backend.id());
    }

    let runner = BatchRunnerConfig {
        output_root: args.out.clone().or_else(|| config.output.results_dir.clone()),
        model_prefix: args
            .prefix
            .clone()
            .unwrap_or_else(|| config.output.prefix.clone()),
        params: ModelParameters {
            alpha: args.alpha.unwrap_or(config.model.alpha),
        },
        settings: config.solver.settings(),
        threads: args.threads.unwrap_or(config.output.threads),
        render_plots: config.output.plots && !args.no_plots,
    };
    let report = run_batch(&inputs, backend.as_ref(), &runner)?;

    match args.format {
        OutputFormat::Table => write_summary_table(
            io::stdout(),
            report.summary.as_ref(),
            &report.failures,
            &report.artifact_errors,
        )?,
        OutputFormat::Json => write_summary_json(io::stdout(), &report)?,
    }
    if let Some(path) = &report.manifest_path {
        info!("results written to {}", path.display());
    }
    Ok(())
}
