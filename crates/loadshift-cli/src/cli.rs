use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use loadshift_algo::BACKEND_IDS;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loadshift", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level [default: info, or `[logging] level` from the config]
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve every scenario and print the results summary
    Run(RunArgs),
    /// Load the input bundles without solving
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Scenario list utilities
    Scenarios {
        #[command(subcommand)]
        command: ScenariosCommands,
    },
}

/// Where to find the four input bundles.
///
/// `--data-dir` supplies the conventional layout; individual paths override it.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Directory holding `question_1b/` and `scenarios.json`
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,
    /// Appliance parameters JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub appliance: Option<PathBuf>,
    /// PV production JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub pv: Option<PathBuf>,
    /// Usage preferences JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub usage: Option<PathBuf>,
    /// Scenario list (JSON or YAML)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub scenarios: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// Discomfort weight in the objective [default: 10]
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Results directory for trajectories, charts and the batch manifest
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub out: Option<PathBuf>,
    /// Skip chart rendering
    #[arg(long)]
    pub no_plots: bool,
    /// Artifact file-name prefix [default: 1b]
    #[arg(long)]
    pub prefix: Option<String>,
    /// Worker threads (1 = sequential, 0 = all CPUs) [default: 1]
    #[arg(long)]
    pub threads: Option<usize>,
    /// Solver backend [default: clarabel]
    #[arg(
        long,
        ignore_case = true,
        value_parser = PossibleValuesParser::new(BACKEND_IDS.iter().copied())
    )]
    pub solver: Option<String>,
    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum ScenariosCommands {
    /// List scenario ids with grid caps and tariffs
    List {
        /// Scenario list (JSON or YAML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        scenarios: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "loadshift",
            "--log-level",
            "debug",
            "run",
            "--data-dir",
            "data",
            "--alpha",
            "2.5",
            "--no-plots",
            "--threads",
            "0",
            "--format",
            "json",
            "--solver",
            "clarabel",
        ]);
        assert_eq!(cli.log_level, Some(tracing::Level::DEBUG));
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.inputs.data_dir, Some(PathBuf::from("data")));
        assert_eq!(args.alpha, Some(2.5));
        assert!(args.no_plots);
        assert_eq!(args.threads, Some(0));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.solver.as_deref(), Some("clarabel"));
    }

    #[test]
    fn solver_flag_only_accepts_known_backends() {
        let err = Cli::try_parse_from(["loadshift", "run", "--solver", "gurobi"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert!(err.to_string().contains("clarabel"));
    }
}
