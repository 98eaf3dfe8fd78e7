use crate::core::errors::Result;
use crate::core::models::output_row::OutputRow;

/// Port for persisting flattened rows.
pub trait RowSink {
    /// Append all rows of one report. Either every row is handed to the
    /// underlying storage or none is.
    fn append_report(&mut self, rows: &[OutputRow]) -> Result<()>;

    /// Flush pending output and release the underlying storage.
    fn finish(self) -> Result<()>
    where
        Self: Sized;
}
