use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{DmarcError, Result};
use crate::core::models::batch_summary::BatchSummary;
use crate::core::models::output_row::OutputRow;
use crate::core::traits::archive::ReportArchive;
use crate::core::traits::parser::ReportParser;
use crate::core::traits::progress::ProgressObserver;
use crate::core::traits::sink::RowSink;

/// Converts report files one at a time: extract, append, archive.
///
/// A file is only archived after all of its rows were appended. Any
/// failure leaves the file where it is and the batch moves on to the
/// next one.
pub struct ReportBatchConverter<P: ReportParser, S: RowSink, A: ReportArchive> {
    pub parser: P,
    pub sink: S,
    pub archive: A,
}

impl<P: ReportParser, S: RowSink, A: ReportArchive> ReportBatchConverter<P, S, A> {
    pub fn new(parser: P, sink: S, archive: A) -> Self {
        Self {
            parser,
            sink,
            archive,
        }
    }

    /// Convert a single report file. Returns the number of rows appended.
    pub fn convert_file(
        &mut self,
        path: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<usize> {
        let bytes = fs::read(path)?;
        let extraction = self.parser.extract(&bytes)?;
        observer.outline(&extraction.outline);
        let report = extraction.report?;

        if report.skipped_records > 0 {
            observer.records_skipped(path, report.skipped_records);
        }
        if report.records.is_empty() {
            observer.no_records(path);
        }

        let rows = OutputRow::from_report(&report);
        self.sink.append_report(&rows)?;
        self.archive.commit(path)?;

        Ok(rows.len())
    }

    /// Convert every file in `files`, in order.
    ///
    /// An `Err` item is a listing failure: it is reported and counted as
    /// unreadable, and the batch carries on.
    pub fn run<I>(&mut self, files: I, observer: &mut dyn ProgressObserver) -> BatchSummary
    where
        I: IntoIterator<Item = Result<PathBuf>>,
    {
        let mut summary = BatchSummary::default();

        for listed in files {
            let path = match listed {
                Ok(path) => path,
                Err(e) => {
                    summary.unreadable += 1;
                    observer.entry_unreadable(&e);
                    continue;
                }
            };
            summary.discovered += 1;
            observer.file_started(&path);

            match self.convert_file(&path, observer) {
                Ok(rows) => {
                    summary.converted += 1;
                    summary.rows_written += rows;
                    observer.file_committed(&path, rows);
                }
                Err(e) => {
                    summary.failed += 1;
                    observer.file_failed(&path, &e);
                }
            }
        }

        summary
    }

    /// Release the sink, flushing anything still buffered.
    pub fn finish(self) -> Result<()> {
        self.sink.finish()
    }
}
