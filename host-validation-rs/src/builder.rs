//! Validation builder pattern
//!
//! This module provides a fluent API for chaining validation rules. The chain
//! stops evaluating at the first failing rule, so later rules may assume the
//! earlier ones held.

use crate::errors::{ValidationError, ValidationResult};
use regex::Regex;

/// Builder for chaining validation rules
#[derive(Debug, Clone)]
pub struct ValidationBuilder<T> {
    /// The value being validated
    value: T,
    /// First error encountered during validation
    error: Option<ValidationError>,
}

impl<T> ValidationBuilder<T> {
    /// Create a new validation builder
    pub fn new(value: T) -> Self {
        Self { value, error: None }
    }

    /// Apply a validation function unless an earlier step already failed
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: FnOnce(&T) -> ValidationResult<()>,
    {
        if self.error.is_none() {
            if let Err(err) = validator(&self.value) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Finish validation and return the result
    pub fn finish(self) -> ValidationResult<T> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

// String-specific validation extension
impl<T: AsRef<str>> ValidationBuilder<T> {
    /// Validate that a string is not empty
    pub fn not_empty(self) -> Self {
        self.validate(|s| {
            if s.as_ref().is_empty() {
                Err(ValidationError::Empty)
            } else {
                Ok(())
            }
        })
    }

    /// Validate that a string does not exceed `max` bytes
    pub fn max_length(self, max: usize) -> Self {
        self.validate(|s| {
            let len = s.as_ref().len();
            if len > max {
                Err(ValidationError::TooLong { len, max })
            } else {
                Ok(())
            }
        })
    }

    /// Validate that a string matches a compiled pattern
    pub fn matches(self, re: &Regex) -> Self {
        self.validate(|s| {
            if re.is_match(s.as_ref()) {
                Ok(())
            } else {
                Err(ValidationError::PatternMismatch(format!(
                    "'{}' does not match pattern {}",
                    s.as_ref(),
                    re.as_str()
                )))
            }
        })
    }
}
