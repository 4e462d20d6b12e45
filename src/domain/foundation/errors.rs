//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid state transition error.
    pub fn invalid_transition(from: impl fmt::Debug, to: impl fmt::Debug) -> Self {
        ValidationError::InvalidTransition {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("owner_id");
        assert_eq!(format!("{}", err), "Field 'owner_id' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_transition_uses_debug_names() {
        #[derive(Debug)]
        enum Stage {
            Approved,
            Pending,
        }
        let err = ValidationError::invalid_transition(Stage::Approved, Stage::Pending);
        assert_eq!(format!("{}", err), "Cannot transition from Approved to Pending");
    }
}
