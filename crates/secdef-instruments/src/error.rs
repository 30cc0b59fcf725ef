//! Error types for instrument definitions.

use thiserror::Error;

use secdef_core::{CoreError, Date};

/// A specialized Result type for instrument operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors that can occur while building or slicing instrument definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// A schedule could not be generated.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of what's invalid.
        reason: String,
    },

    /// A definition is internally inconsistent.
    #[error("Invalid definition: {reason}")]
    InvalidDefinition {
        /// Description of what's invalid.
        reason: String,
    },

    /// A required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// A past fixing is not in the fixing series.
    #[error("Could not get fixing value for index {index} on {date}")]
    MissingFixing {
        /// Index name.
        index: String,
        /// Fixing date.
        date: Date,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),
}

impl InstrumentError {
    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid definition error.
    #[must_use]
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
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

    /// Creates a missing fixing error.
    #[must_use]
    pub fn missing_fixing(index: impl Into<String>, date: Date) -> Self {
        Self::MissingFixing {
            index: index.into(),
            date,
        }
    }
}
