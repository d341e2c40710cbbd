//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the catalog's data rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid course '{id}': {reason}")]
    InvalidCourse { id: String, reason: String },

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
