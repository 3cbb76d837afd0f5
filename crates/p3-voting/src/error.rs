//! Record lookup error types.

use thiserror::Error;

/// Errors a [`crate::VotingRecords`] backend can report.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The requested record does not exist (e.g. the user has no speaker
    /// profile). Eligibility treats this as a failed rule.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// The backing store failed.
    #[error("record backend error: {0}")]
    Backend(String),

    /// Failed to read a record file.
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a record file.
    #[error("failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RecordError {
    #[must_use]
    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }
}
