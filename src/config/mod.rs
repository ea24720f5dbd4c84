pub mod text_log;
pub mod toml_config;

pub const DEFAULT_LOG_PATH: &str = "dojo_records.txt";

#[cfg(feature = "cli")]
use clap::Parser;

/// Command-line flags. Values given here override the TOML file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dojo-roster")]
#[command(about = "Console record manager for a martial arts school")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// File the roster is appended to on save [default: dojo_records.txt]
    #[arg(long)]
    pub log_path: Option<String>,

    /// Number of slots the roster starts with [default: 2]
    #[arg(long)]
    pub initial_capacity: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
