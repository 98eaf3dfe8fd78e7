use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Default output file, relative to the working directory.
pub const DEFAULT_CSV_FILE: &str = "dmarc_parsed.csv";

/// Name of the archive subdirectory created under the input directory.
pub const ARCHIVE_DIR_NAME: &str = "_parsed";

/// Resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding downloaded aggregate reports.
    pub input_dir: PathBuf,
    /// CSV file rows are appended to.
    pub csv_path: PathBuf,
    /// Print a completion line for every converted file.
    pub verbose: bool,
}

impl AppConfig {
    pub fn new(input_dir: impl Into<PathBuf>, csv_path: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            input_dir: input_dir.into(),
            csv_path: csv_path.into(),
            verbose,
        }
    }

    /// Build the configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(&cli.path, &cli.csv, cli.verbose)
    }

    /// Where successfully converted reports are moved.
    pub fn archive_dir(&self) -> PathBuf {
        self.input_dir.join(ARCHIVE_DIR_NAME)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }
}
