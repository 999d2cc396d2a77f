use thiserror::Error;

/// Error type covering saving-entry validation and persistence failures.
///
/// Goal and limit inputs never produce errors; malformed text there degrades
/// to zero instead (see [`crate::parse`]).
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Raised only when adding a saving entry whose amount is missing,
    /// unparsable, or not strictly positive.
    #[error("saving amount must be greater than zero")]
    NotPositive,
    /// Raised when an update or delete targets a position no longer present
    /// in the savings sequence.
    #[error("saving index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, PlanningError>;

impl From<std::io::Error> for PlanningError {
    fn from(err: std::io::Error) -> Self {
        PlanningError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PlanningError {
    fn from(err: serde_json::Error) -> Self {
        PlanningError::Storage(err.to_string())
    }
}
