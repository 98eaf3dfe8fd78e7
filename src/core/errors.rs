use std::path::PathBuf;

/// All domain errors for dmarc2csv.
///
/// `DirectoryNotFound` and `OutputUnavailable` abort the run. Every other
/// variant is scoped to a single report file: the file is skipped, left in
/// place, and the batch moves on.
#[derive(Debug, thiserror::Error)]
pub enum DmarcError {
    #[error(
        "Input directory not found: {path}\n\n  \
         Check that --path points to an existing directory containing\n  \
         downloaded DMARC aggregate reports (*.xml)."
    )]
    DirectoryNotFound { path: PathBuf },

    #[error("Cannot open output CSV {path}: {reason}")]
    OutputUnavailable { path: PathBuf, reason: String },

    #[error("No <report_metadata> found")]
    MissingMetadata,

    #[error("Date range missing: no <date_range>/<{boundary}> in <report_metadata>")]
    MissingDateRange { boundary: &'static str },

    #[error("Malformed <{boundary}> timestamp: '{value}' is not a valid epoch-seconds value")]
    MalformedTimestamp {
        boundary: &'static str,
        value: String,
    },

    #[error("Parse error: {detail}")]
    ParseError { detail: String },

    #[error("CSV write failed: {detail}")]
    CsvWrite { detail: String },

    #[error("Could not archive {path}: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DmarcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_message_names_path() {
        let err = DmarcError::DirectoryNotFound {
            path: PathBuf::from("reports/inbox"),
        };
        assert!(err.to_string().contains("reports/inbox"));
    }

    #[test]
    fn messages_name_the_missing_piece() {
        let err = DmarcError::MissingDateRange { boundary: "begin" };
        assert!(err.to_string().contains("<begin>"));

        let err = DmarcError::MalformedTimestamp {
            boundary: "end",
            value: "yesterday".into(),
        };
        assert!(err.to_string().contains("'yesterday'"));
    }
}
