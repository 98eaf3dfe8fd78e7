use std::path::Path;

use crate::adapters::archive::directory_archive::DirectoryArchive;
use crate::adapters::parsers::xml_report_parser::XmlReportParser;
use crate::adapters::sinks::csv_row_sink::CsvRowSink;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{DmarcError, Result};
use crate::core::models::batch_summary::BatchSummary;
use crate::core::models::outline::DocumentOutline;
use crate::core::services::batch_converter::ReportBatchConverter;
use crate::core::services::discovery_service::DiscoveryService;
use crate::core::traits::parser::ReportParser;
use crate::core::traits::progress::ProgressObserver;

/// Prints batch progress to the terminal.
///
/// Structural lines (tags, record presence, failures) are always shown;
/// per-file completion lines only in verbose mode.
struct ConsoleProgress {
    verbose: bool,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ProgressObserver for ConsoleProgress {
    fn file_started(&mut self, path: &Path) {
        output::info(&format!("Processing: {}", file_name(path)));
    }

    fn outline(&mut self, outline: &DocumentOutline) {
        output::info(&format!("Root tag: {}", outline.root_tag));
        for tag in &outline.child_tags {
            output::detail(&format!("Child tag: {tag}"));
        }
    }

    fn no_records(&mut self, _path: &Path) {
        output::warning("No <record> tags found.");
    }

    fn records_skipped(&mut self, _path: &Path, count: usize) {
        output::warning(&format!("Skipped {count} <record> without <row>"));
    }

    fn file_committed(&mut self, path: &Path, rows: usize) {
        if self.verbose {
            output::success(&format!(
                "Parsed and moved: {} ({rows} rows)",
                file_name(path)
            ));
        }
    }

    fn file_failed(&mut self, path: &Path, error: &DmarcError) {
        output::error(&format!("Error parsing {}: {error}", file_name(path)));
    }

    fn entry_unreadable(&mut self, error: &DmarcError) {
        output::warning(&format!("Could not read directory entry: {error}"));
    }
}

/// Execute the conversion run.
///
/// Lists reports in the input directory, appends their rows to the CSV
/// and archives each converted report under `_parsed`. Only a missing
/// input directory or an unusable output file makes this fail; per-report
/// problems are printed and skipped.
pub fn execute(config: &AppConfig) -> Result<BatchSummary> {
    let parser = XmlReportParser;
    let files = DiscoveryService.discover(config.input_dir(), parser.supported_extensions())?;

    let sink = CsvRowSink::open(&config.csv_path)?;
    let archive = DirectoryArchive::new(config.archive_dir());

    output::header(&format!(
        "dmarc2csv: {} → {}",
        config.input_dir.display(),
        config.csv_path.display()
    ));

    let mut converter = ReportBatchConverter::new(parser, sink, archive);
    let mut progress = ConsoleProgress {
        verbose: config.verbose,
    };
    let summary = converter.run(files, &mut progress);
    converter.finish()?;

    println!();
    output::success(&format!(
        "Converted {}/{} reports, {} rows appended",
        summary.converted, summary.discovered, summary.rows_written
    ));
    if !summary.is_clean() {
        output::warning(&format!(
            "{} report(s) left in {} for inspection, {} unreadable entries skipped",
            summary.failed,
            config.input_dir.display(),
            summary.unreadable
        ));
    }

    Ok(summary)
}
