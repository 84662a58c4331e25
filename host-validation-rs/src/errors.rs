//! Error handling for the validation library
//!
//! Every predicate in this crate has a `validate_*` form returning
//! [`ValidationResult`] and an `is_*` form collapsing it to `bool`. The error
//! type keeps the two failure families apart: the input could not be parsed
//! at all, or it parsed but broke one of the host/URI rules.

use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Enum representing different validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is empty where a value is required
    #[error("Input must not be empty")]
    Empty,

    /// Input exceeds a length limit
    #[error("Input exceeds maximum length: {len} > {max}")]
    TooLong {
        /// Observed length in bytes
        len: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Input does not match the required pattern
    #[error("Pattern match failed: {0}")]
    PatternMismatch(String),

    /// The URI / URL / base64 parser rejected the input
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// Input parsed but breaks a policy rule (scheme, label, port, path...)
    #[error("Policy violation: {0}")]
    PolicyViolation(String),
}

impl ValidationError {
    /// Create a parse failure with a message
    pub fn parse<S: Into<String>>(message: S) -> Self {
        ValidationError::ParseFailure(message.into())
    }

    /// Create a policy violation with a message
    pub fn policy<S: Into<String>>(message: S) -> Self {
        ValidationError::PolicyViolation(message.into())
    }

    /// Returns true if the underlying parser rejected the input
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ValidationError::ParseFailure(_))
    }

    /// Returns true if the input was structurally fine but failed a rule
    pub fn is_policy_violation(&self) -> bool {
        !self.is_parse_failure()
    }
}
