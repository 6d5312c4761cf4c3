//! Error types for the page-turn core.
//!
//! Nothing here is fatal: components log these and skip the frame's update.

use thiserror::Error;

/// Errors raised by page-turn components.
#[derive(Debug, Error)]
pub enum TurnPageError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Fewer page images than a turn needs.
    #[error("Missing page data: need at least {required} pages, got {provided}")]
    MissingPageData { required: usize, provided: usize },

    /// A point list does not match the mesh's rung count.
    #[error("Point count mismatch: expected {expected} rungs, got {actual}")]
    PointCountMismatch { expected: usize, actual: usize },

    /// JSON config could not be parsed or written.
    #[error("Config serialization error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, TurnPageError>`.
pub type TurnPageResult<T> = Result<T, TurnPageError>;
