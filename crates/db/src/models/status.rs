//! Generation request lifecycle status.
//!
//! Stored as TEXT with a CHECK constraint; every status literal in SQL
//! goes through [`GenerationStatus::as_str`], never a magic string.

use storyforge_core::error::CoreError;

/// Lifecycle of a generation request.
///
/// `Queued → Processing → {Done, Failed}`; `Done` and `Failed` are
/// terminal. The coordinator sets `Queued`, only the worker moves a
/// request forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Queued,
    Processing,
    Done,
    Failed,
}

impl GenerationStatus {
    /// Database column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Processing => "PROCESSING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }

    /// Parse from the database `status` column.
    pub fn from_str(value: &str) -> Result<Self, CoreError> {
        match value {
            "QUEUED" => Ok(Self::Queued),
            "PROCESSING" => Ok(Self::Processing),
            "DONE" => Ok(Self::Done),
            "FAILED" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown generation status '{other}'"
            ))),
        }
    }
}
