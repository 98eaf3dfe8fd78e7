/// Shallow view of a report document: the root tag and its direct children.
///
/// Captured before extraction so it can be printed even when the report
/// itself turns out to be unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentOutline {
    pub root_tag: String,
    pub child_tags: Vec<String>,
}
