pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::app_config::DEFAULT_CSV_FILE;

/// Flatten DMARC aggregate reports into an append-only CSV.
///
/// Every `*.xml` report in the input directory is converted to one CSV row
/// per record and then moved to `<path>/_parsed`. Reports that fail to
/// convert stay where they are.
#[derive(Parser, Debug)]
#[command(name = "dmarc2csv", version, about, long_about = None)]
pub struct Cli {
    /// Path to folder containing DMARC XMLs
    #[arg(long, env = "DMARC_PATH")]
    pub path: PathBuf,

    /// CSV output file path
    #[arg(long, env = "DMARC_CSV", default_value = DEFAULT_CSV_FILE)]
    pub csv: PathBuf,

    /// Print progress messages
    #[arg(short, long)]
    pub verbose: bool,
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
    fn path_is_required() {
        let err = Cli::try_parse_from(["dmarc2csv", "--csv", "out.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
