// Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Browser-based CPU, memory and disk history for a Cloud Foundry app.
#[derive(Debug, Parser)]
#[command(name = "appstats", version, about)]
pub struct Cli {
    /// Name of the app in the targeted space.
    pub app_name: String,

    /// HTTP port to listen on (overrides server.port).
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// TOML config file; defaults to ./config.toml when present.
    #[arg(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}
