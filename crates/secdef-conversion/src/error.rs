//! Error types for conversions.

use thiserror::Error;

use secdef_core::CoreError;
use secdef_instruments::InstrumentError;
use secdef_securities::SecurityError;
use secdef_traits::TraitError;

/// A specialized Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors raised while converting a security or trade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A lookup found nothing for a key the conversion needs.
    #[error("{0}")]
    MissingReferenceData(String),

    /// The security, leg or trade kind is not converted.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// A security field is missing or unusable.
    #[error("Missing or invalid field {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stub descriptor or notional schedule is inconsistent.
    #[error(transparent)]
    Validation(#[from] SecurityError),

    /// A reference-data source failed.
    #[error(transparent)]
    Trait(#[from] TraitError),

    /// Building the instrument definition failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Lower-level date or convention error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ConversionError {
    /// Creates a missing reference data error.
    #[must_use]
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingReferenceData(message.into())
    }

    /// Creates an unsupported error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
