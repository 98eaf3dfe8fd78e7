mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::Cli;
use config::app_config::AppConfig;

fn main() {
    let args = Cli::parse();
    let config = AppConfig::from_cli(&args);

    // Per-report failures are already reported; only run-level errors land here.
    if let Err(e) = cli::commands::convert::execute(&config) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
