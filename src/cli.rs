use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "expateats", version, about = "ExpatEats backend server")]
pub struct Args {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides the configured database URL.
    #[arg(long, value_name = "URL")]
    pub db_url: Option<String>,
}
