use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::core::errors::{DmarcError, Result};
use crate::core::models::output_row::{CSV_HEADER, OutputRow};
use crate::core::traits::sink::RowSink;

/// Appends flattened report rows to a CSV file.
///
/// The file is opened once in append mode and held for the lifetime of
/// the sink. Each report's rows are encoded into memory first and then
/// written and flushed in one go, so a report is never half-appended
/// because of an encoding error.
///
/// The header is only written when the file does not exist yet. An
/// existing file's header is trusted as-is.
pub struct CsvRowSink {
    path: PathBuf,
    file: File,
}

impl CsvRowSink {
    /// Open `path` for appending, creating it (and its parent directory)
    /// with the header row if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |e: std::io::Error| DmarcError::OutputUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }

        let file = match OpenOptions::new().create_new(true).append(true).open(path) {
            Ok(mut file) => {
                write_header(path, &mut file)?;
                file
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(unavailable)?,
            Err(e) => return Err(unavailable(e)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn write_failed(&self, e: impl std::fmt::Display) -> DmarcError {
        DmarcError::CsvWrite {
            detail: format!("{}: {e}", self.path.display()),
        }
    }
}

/// Write the header into a file that was just created at `path`.
/// On failure the file is removed again.
fn write_header(path: &Path, file: &mut impl Write) -> Result<()> {
    let written = encode(|w| w.write_record(CSV_HEADER)).and_then(|header| {
        file.write_all(&header)
            .and_then(|()| file.flush())
            .map_err(|e| DmarcError::OutputUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    });

    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

/// Encode records into an in-memory CSV buffer (CRLF, minimal quoting).
fn encode<F>(fill: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    fill(&mut writer).map_err(|e| DmarcError::CsvWrite {
        detail: e.to_string(),
    })?;

    writer.into_inner().map_err(|e| DmarcError::CsvWrite {
        detail: e.to_string(),
    })
}

impl RowSink for CsvRowSink {
    fn append_report(&mut self, rows: &[OutputRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let chunk = encode(|w| rows.iter().try_for_each(|row| w.serialize(row)))?;

        self.file
            .write_all(&chunk)
            .map_err(|e| self.write_failed(e))?;
        self.file.flush().map_err(|e| self.write_failed(e))?;

        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.file.flush().map_err(|e| self.write_failed(e))?;
        self.file.sync_all().map_err(|e| self.write_failed(e))?;
        Ok(())
    }
}
