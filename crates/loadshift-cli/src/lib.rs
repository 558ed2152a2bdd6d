pub mod cli;
pub mod config;
pub mod summary;

pub use cli::{Cli, Commands, InputArgs, OutputFormat, RunArgs, ScenariosCommands};
pub use config::{load_config, LoadshiftConfig};
