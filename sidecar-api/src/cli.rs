// CLI argument parsing and definitions

use clap::Parser;
use sidecar_logging::{Level, LogError};

#[derive(Debug, Clone, Parser)]
#[command(name = "sidecar-api")]
#[command(about = "Local diagnostic backend for the desktop shell")]
#[command(version)]
pub struct Args {
    /// Path of the hosting application bundle (informational only)
    pub app_path: Option<String>,

    /// Port the HTTP server binds on (loopback only)
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Watch the working directory and report source changes
    #[arg(long)]
    pub reload: bool,

    /// Minimum severity written to the structured stream
    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: Level,
}

fn parse_level(raw: &str) -> Result<Level, String> {
    raw.parse().map_err(|err: LogError| err.to_string())
}
