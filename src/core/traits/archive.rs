use std::path::{Path, PathBuf};

use crate::core::errors::Result;

/// Port for marking a source report as processed.
pub trait ReportArchive {
    /// Move `source` out of the input set. Returns its new location.
    fn commit(&self, source: &Path) -> Result<PathBuf>;
}
