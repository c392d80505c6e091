//! Error taxonomy shared by every store implementation.
//!
//! Backends translate their driver errors into [`Error`] so callers never see
//! driver-specific types. The presentation layer decides what each variant
//! means to an end user.

use std::fmt;

/// Unified error type for store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required field was missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "user", "movie").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The username is already taken.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// The store is busy or unavailable; the caller may retry.
    #[error("Store temporarily unavailable: {0}")]
    Transient(String),

    /// Unexpected store failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convenience constructor for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::DuplicateUsername`].
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Error::DuplicateUsername(username.into())
    }

    /// Convenience constructor for [`Error::Transient`].
    pub fn transient(msg: impl Into<String>) -> Self {
        Error::Transient(msg.into())
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the caller may retry the operation unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transient(_))
    }

    /// Whether this is a [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
