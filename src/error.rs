//! Layout engine error types.

use thiserror::Error;

/// Errors produced by the layout engine and the navigation dispatcher.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Malformed configuration or geometry. Caller bug.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Node has no image and was left out of the scene.
    #[error("missing image for node {index}")]
    MissingImage { index: usize },

    /// Activation referred to a node that is not in the current layout.
    #[error("stale reference: node {index} (layout has {len} nodes)")]
    StaleReference { index: usize, len: usize },
}

impl LayoutError {
    /// Fatal errors mean the caller passed bad input; the rest are
    /// expected at runtime and can be ignored.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LayoutError::InvalidInput(_))
    }
}
