use clap::Parser;
use loadshift_cli::{load_config, Cli, Commands};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let level = match cli.log_level {
        Some(level) => level,
        None => match config.logging.level() {
            Ok(level) => level,
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    debug!(?config, "effective configuration");

    let result = match &cli.command {
        Commands::Run(args) => commands::run::handle(args, &config),
        Commands::Validate { inputs } => commands::validate::handle(inputs, &config),
        Commands::Scenarios { command } => commands::scenarios::handle(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
