//! Unified error types for the tracker.
//!
//! Repositories surface every storage failure as a typed [`Error`] instead of
//! an empty collection or a `false`, so callers can tell a legitimate absence
//! from a failed round trip. [`Error::kind`] gives the coarse classification
//! views use to decide between retrying, showing a message, or moving on.

use thiserror::Error;

/// Coarse classification of an [`Error`] for callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The addressed row does not exist.
    NotFound,
    /// The storage round trip failed; re-fetching or re-submitting may succeed.
    TransientFailure,
    /// The input was rejected before reaching storage.
    Validation,
    /// Configuration, I/O or encoding failure local to this process.
    Internal,
}

/// All errors produced by the tracker.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file unreadable, unparsable or out of range
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A storage round trip failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No row with this id
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. `"Project"`
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// Input rejected before reaching storage
    #[error("Validation failed: {message}")]
    Validation {
        /// Which field and why
        message: String,
    },

    /// Text that is not a `YYYY-MM-DD` date
    #[error("Invalid date: {input}")]
    InvalidDate {
        /// The rejected text
        input: String,
    },

    /// Local file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON column encoding
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] on `entity` with the given id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Classifies the error for the view layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::TransientFailure,
            Self::Validation { .. } | Self::InvalidDate { .. } => ErrorKind::Validation,
            Self::Config { .. } | Self::Io(_) | Self::Csv(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_separates_absence_from_failure() {
        assert_eq!(Error::not_found("Project", "p1").kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::from(sea_orm::DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::TransientFailure
        );
        assert_eq!(Error::validation("empty name").kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let err = Error::not_found("Supplier", "abc");
        assert_eq!(err.to_string(), "Supplier not found: abc");
    }
}
