use anyhow::{Context, Result};
use loadshift_cli::cli::InputArgs;
use loadshift_cli::config::{resolve_input_paths, LoadshiftConfig};
use loadshift_io::load_inputs;

pub fn handle(inputs: &InputArgs, config: &LoadshiftConfig) -> Result<()> {
    let paths = resolve_input_paths(inputs, &config.inputs)?;
    let bundle = load_inputs(&paths).context("loading input bundles")?;
    let appliance = &bundle.shared.appliance;
    println!("Inputs OK: {} scenarios", bundle.scenarios.len());
    println!(
        "  Load range      : {} .. {}",
        appliance.min_load, appliance.max_load
    );
    println!(
        "  PV production   : {:.3} kWh/day (peak {:.3})",
        bundle.shared.pv_production.sum(),
        bundle.shared.pv_production.max()
    );
    println!(
        "  Reference load  : {:.3} kWh/day",
        bundle.shared.reference_load.sum()
    );
    Ok(())
}
