use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::errors::{DmarcError, Result};
use crate::core::traits::archive::ReportArchive;

/// Archives processed reports by moving them into a directory.
///
/// The directory is created on first use. Files keep their base name; an
/// older file with the same name in the archive is replaced.
pub struct DirectoryArchive {
    dir: PathBuf,
}

impl DirectoryArchive {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ReportArchive for DirectoryArchive {
    fn commit(&self, source: &Path) -> Result<PathBuf> {
        let failed = |reason: String| DmarcError::ArchiveFailed {
            path: source.to_path_buf(),
            reason,
        };

        let name = source
            .file_name()
            .ok_or_else(|| failed("path has no file name".into()))?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            failed(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let dest = self.dir.join(name);
        match fs::rename(source, &dest) {
            Ok(()) => {}
            // Archive on another filesystem: copy, then drop the original.
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                fs::copy(source, &dest).map_err(|e| failed(e.to_string()))?;
                fs::remove_file(source).map_err(|e| failed(e.to_string()))?;
            }
            Err(e) => return Err(failed(e.to_string())),
        }

        Ok(dest)
    }
}
