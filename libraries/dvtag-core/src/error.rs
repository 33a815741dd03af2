/// Core error types for dvtag
use crate::types::WorkId;
use thiserror::Error;

/// Result type alias using `DvtagError`
pub type Result<T> = std::result::Result<T, DvtagError>;

/// Core error type for dvtag
///
/// Every variant except `Io` is a lookup failure: it is raised before a
/// single file of the work has been touched.
#[derive(Error, Debug)]
pub enum DvtagError {
    /// No work identifier could be found in a folder name
    #[error("No work identifier in name: {0}")]
    InvalidWorkId(String),

    /// The provider has no record for this work
    #[error("Work not found: {0}")]
    WorkNotFound(WorkId),

    /// The provider could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The provider returned a record that cannot be used
    #[error("Invalid metadata record for {work_id}: {reason}")]
    InvalidRecord {
        /// Work the record belongs to
        work_id: WorkId,
        /// What is wrong with it
        reason: String,
    },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl DvtagError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid record error
    pub fn invalid_record(work_id: WorkId, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            work_id,
            reason: reason.into(),
        }
    }
}
