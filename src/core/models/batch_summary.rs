/// Totals for one batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Report files discovered in the input directory.
    pub discovered: usize,
    /// Files whose rows were appended and which were moved to the archive.
    pub converted: usize,
    /// Files skipped because extraction, writing or archiving failed.
    pub failed: usize,
    /// CSV rows appended across all converted files.
    pub rows_written: usize,
    /// Directory entries that could not be read while listing reports.
    pub unreadable: usize,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.unreadable == 0
    }
}
