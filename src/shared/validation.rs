//! Request Schema Validation
//!
//! Declarative shape and range checks for request bodies. Each schema
//! implements [`Validate`] by running a [`Validator`] over its fields; every
//! violation is collected so the caller sees all offending fields at once.

use std::fmt::Display;

use crate::shared::error::{FieldViolation, SharedError};

/// A request schema that can check its own field constraints
pub trait Validate {
    /// Check every field constraint, reporting all violations together
    fn validate(&self) -> Result<(), SharedError>;
}

/// Collects field violations for one request body
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-blank string
    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    /// Require `min <= value <= max`
    pub fn range<T>(&mut self, field: &str, value: T, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + Display + Copy,
    {
        if !(value >= min && value <= max) {
            self.violations.push(FieldViolation::new(
                field,
                format!("must be between {} and {}", min, max),
            ));
        }
        self
    }

    /// Range check that only applies when the field was supplied
    pub fn range_opt<T>(&mut self, field: &str, value: Option<T>, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + Display + Copy,
    {
        if let Some(value) = value {
            self.range(field, value, min, max);
        }
        self
    }

    /// Record `message` against `field` when `condition` does not hold
    pub fn check(&mut self, condition: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    /// Hand back the collected violations for a caller-specific report
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// Finish validation
    ///
    /// # Returns
    /// `Ok(())` when nothing was violated, otherwise a
    /// `SharedError::ValidationError` listing every violation in check order
    pub fn finish(self) -> Result<(), SharedError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(SharedError::violations(self.violations))
        }
    }
}
