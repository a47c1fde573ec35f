//! Error types for models and records

use serde_json::Value;

/// Model errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Record attributes must be a JSON object
    #[error("{model} attributes must be an object, got {value}")]
    NotAnObject {
        /// Model name
        model: String,
        /// Offending value
        value: Value,
    },

    /// Identifier cannot be rendered into a URL
    #[error("{model} identifier is not string-convertible: {value}")]
    InvalidIdentifier {
        /// Model name
        model: String,
        /// Offending identifier value
        value: Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_error_display() {
        let err = ModelError::InvalidIdentifier {
            model: "User".into(),
            value: json!({ "a": 1 }),
        };
        assert_eq!(
            err.to_string(),
            r#"User identifier is not string-convertible: {"a":1}"#
        );
    }
}
