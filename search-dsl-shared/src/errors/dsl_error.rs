//! DSL error types.
//!
//! This module defines the errors raised while building or serializing a
//! request body. All of them are returned synchronously to the caller.

use thiserror::Error;

/// Errors that can occur while building or serializing DSL entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    /// A required identifying value (type or name) was empty.
    #[error("Construction error: {0}")]
    Construction(String),

    /// An erased value did not carry the expected capability.
    #[error("Argument must be an instance of {expected}")]
    TypeConstraint { expected: String, actual: String },

    /// A parameter value is not one of the accepted values.
    #[error("The '{param}' parameter should be one of {accepted}")]
    InvalidParam {
        param: String,
        accepted: String,
        actual: String,
    },

    /// A required option was still missing when the entity was serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The operation is not supported by this entity variant.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl DslError {
    /// Create a construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Create a type constraint error.
    pub fn type_constraint(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeConstraint {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param(
        param: impl Into<String>,
        accepted: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidParam {
            param: param.into(),
            accepted: accepted.into(),
            actual: actual.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an unsupported operation error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Name of the offending parameter, for invalid parameter errors.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::InvalidParam { param, .. } => Some(param),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_message() {
        let err = DslError::invalid_param("operator", "[\"and\", \"or\"]", "xor");
        assert_eq!(
            err.to_string(),
            "The 'operator' parameter should be one of [\"and\", \"or\"]"
        );
        assert_eq!(err.param(), Some("operator"));
    }

    #[test]
    fn test_type_constraint_message() {
        let err = DslError::type_constraint("Query", "string");
        assert_eq!(err.to_string(), "Argument must be an instance of Query");
        assert_eq!(err.param(), None);
    }

    #[test]
    fn test_construction_message_keeps_detail() {
        let err = DslError::construction("Suggester `name` cannot be empty");
        assert!(err.to_string().contains("`name`"));
    }
}
