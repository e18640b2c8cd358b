//! Error types for the rep-counting core
//!
//! Structural precondition violations (`InvalidState`, `EmptyData`) are
//! surfaced to the caller for user-facing reporting. Per-frame data gaps
//! (missing landmarks, classifier not ready) are absorbed at the frame
//! level and never reach this enum.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
///
/// Every failure is scoped to a single operation and leaves prior state
/// intact - nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Illegal state transition, e.g. relabeling while collecting.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Export requested with no samples accumulated.
    #[error("no pose data collected yet")]
    EmptyData,

    /// Filesystem failure during sample export/import.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed sample file content.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid state error.
    pub fn invalid_state(details: impl Into<String>) -> Self {
        Self::InvalidState(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_state("stop recording before changing pose");
        assert!(format!("{err}").contains("stop recording"));

        let err = CoreError::EmptyData;
        assert!(format!("{err}").contains("no pose data"));
    }
}
