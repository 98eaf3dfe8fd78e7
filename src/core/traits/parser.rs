use crate::core::errors::Result;
use crate::core::models::outline::DocumentOutline;
use crate::core::models::report::Report;

/// Outcome of reading one report document.
///
/// The outline is available whenever the document is well-formed, even
/// if the report inside it is missing required metadata.
#[derive(Debug)]
pub struct Extraction {
    pub outline: DocumentOutline,
    pub report: Result<Report>,
}

/// Port for turning raw report file content into a `Report`.
pub trait ReportParser {
    /// Parse raw file bytes, honouring the document's declared encoding.
    ///
    /// Returns `Err` only when the document cannot be read as a tree at
    /// all; report-level failures live in `Extraction::report`.
    fn extract(&self, content: &[u8]) -> Result<Extraction>;

    /// File name suffixes this parser handles (e.g. `[".xml"]`).
    fn supported_extensions(&self) -> &[&str];
}
