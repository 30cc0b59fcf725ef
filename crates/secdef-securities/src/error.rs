//! Error types for the security model.

use thiserror::Error;

use secdef_core::CoreError;

/// A specialized Result type for security model operations.
pub type SecurityResult<T> = Result<T, SecurityError>;

/// Errors raised while building or validating security definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SecurityError {
    /// A stub calculation method is inconsistent.
    #[error("Invalid stub: {reason}")]
    InvalidStub {
        /// Description of the inconsistency.
        reason: String,
    },

    /// A notional schedule is malformed.
    #[error("Invalid notional: {reason}")]
    InvalidNotional {
        /// Description of what's invalid.
        reason: String,
    },

    /// An external identifier could not be parsed.
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The text that failed to parse.
        value: String,
        /// Why it failed.
        reason: String,
    },

    /// A required field was not set.
    #[error("Missing field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A security attribute has an unusable value.
    #[error("Invalid attribute {name}: {reason}")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Why it's unusable.
        reason: String,
    },

    /// Lower-level date or convention error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SecurityError {
    /// Creates an invalid stub error.
    #[must_use]
    pub fn invalid_stub(reason: impl Into<String>) -> Self {
        Self::InvalidStub {
            reason: reason.into(),
        }
    }

    /// Creates an invalid notional error.
    #[must_use]
    pub fn invalid_notional(reason: impl Into<String>) -> Self {
        Self::InvalidNotional {
            reason: reason.into(),
        }
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid attribute error.
    #[must_use]
    pub fn invalid_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
