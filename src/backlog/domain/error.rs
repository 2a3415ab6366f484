//! Error types for backlog domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing backlog domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BacklogDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The tag value is empty after trimming.
    #[error("tag must not be empty")]
    EmptyTag,

    /// The color identifier is empty after trimming.
    #[error("color identifier must not be empty")]
    EmptyColorId,
}
