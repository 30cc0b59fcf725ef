//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Malformed identifier.
    #[error("Invalid identifier: {0}. Use SCHEME~VALUE.")]
    InvalidIdentifier(String),

    /// No security under the identifier.
    #[error("No security found for {0}")]
    SecurityNotFound(String),

    /// No trade with the id.
    #[error("No trade found with id {0}")]
    TradeNotFound(String),

    /// The security is not a leg-based swap.
    #[error("{0} is not an interest rate swap")]
    NotASwap(String),

    /// Validation found problems.
    #[error("{0} validation problem(s) found")]
    Validation(usize),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
