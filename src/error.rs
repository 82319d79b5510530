use thiserror::Error;

/// Conditions that stop the story from rendering.
///
/// Per-point data gaps are not errors and never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryError {
    #[error("no rows for aggregate '{aggregate}' with a primary energy value ({scanned} rows scanned)")]
    EmptyDataset { scanned: usize, aggregate: String },

    #[error("no dataset loaded")]
    NotLoaded,
}
