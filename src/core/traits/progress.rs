use std::path::Path;

use crate::core::errors::DmarcError;
use crate::core::models::outline::DocumentOutline;

/// Port for reporting batch progress to the user.
///
/// All methods default to doing nothing so callers only implement the
/// events they care about.
pub trait ProgressObserver {
    fn file_started(&mut self, _path: &Path) {}

    fn outline(&mut self, _outline: &DocumentOutline) {}

    fn no_records(&mut self, _path: &Path) {}

    /// `count` `<record>` elements were dropped because they had no `<row>`.
    fn records_skipped(&mut self, _path: &Path, _count: usize) {}

    fn file_committed(&mut self, _path: &Path, _rows: usize) {}

    fn file_failed(&mut self, _path: &Path, _error: &DmarcError) {}

    /// A directory entry could not be read while listing reports.
    fn entry_unreadable(&mut self, _error: &DmarcError) {}
}
