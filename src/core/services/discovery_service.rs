use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use crate::core::errors::{DmarcError, Result};

/// Lazy listing of report files in a directory.
///
/// Yields regular files whose name ends with one of the accepted suffixes,
/// in whatever order the filesystem lists them. An entry that cannot be
/// read is yielded as an `Err` so the caller can report it.
pub struct ReportFiles {
    entries: ReadDir,
    extensions: Vec<String>,
}

impl ReportFiles {
    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

impl Iterator for ReportFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Result<PathBuf>> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            // Follows symlinks, so a link to a report counts as a report.
            let path = entry.path();
            if path.is_file() && self.matches(&path) {
                return Some(Ok(path));
            }
        }
    }
}

/// Finds report files waiting to be converted.
pub struct DiscoveryService;

impl DiscoveryService {
    /// List candidate report files in `dir`.
    ///
    /// Fails with `DirectoryNotFound` when `dir` is missing or is not a
    /// directory.
    pub fn discover(&self, dir: &Path, extensions: &[&str]) -> Result<ReportFiles> {
        if !dir.is_dir() {
            return Err(DmarcError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let entries = fs::read_dir(dir)?;

        Ok(ReportFiles {
            entries,
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        })
    }
}
