pub mod batch_summary;
pub mod outline;
pub mod output_row;
pub mod report;
