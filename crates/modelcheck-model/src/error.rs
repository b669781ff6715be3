// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model checking operations

use thiserror::Error;

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that can occur while checking a model
#[derive(Error, Debug)]
pub enum CheckError {
    /// A required field is absent from an input record
    #[error("Missing field `{field}` in {record} record")]
    MissingField { record: String, field: String },

    /// Bounding volume with min > max (or a non-finite coordinate) on an axis
    #[error("Invalid bounds on {axis} axis: [{min}, {max}]")]
    InvalidBounds { axis: char, min: f64, max: f64 },

    /// A field is present but carries an unusable value
    #[error("Invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    /// A rule predicate failed while evaluating an element
    #[error("Rule `{rule_id}` failed: {message}")]
    Predicate { rule_id: String, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Create a missing field error
    pub fn missing_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        CheckError::MissingField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, msg: impl Into<String>) -> Self {
        CheckError::InvalidValue {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a predicate failure error
    pub fn predicate(rule_id: impl Into<String>, msg: impl Into<String>) -> Self {
        CheckError::Predicate {
            rule_id: rule_id.into(),
            message: msg.into(),
        }
    }

    /// Returns `true` for the named missing-field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, CheckError::MissingField { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = CheckError::missing_field("clash element", "bounding_box");
        assert!(err.is_missing_field());
        assert_eq!(
            err.to_string(),
            "Missing field `bounding_box` in clash element record"
        );
    }

    #[test]
    fn test_invalid_bounds_message_is_neutral() {
        let err = CheckError::InvalidBounds {
            axis: 'x',
            min: f64::NAN,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "Invalid bounds on x axis: [NaN, 1]");
    }

    #[test]
    fn test_json_error_converts() {
        let err: CheckError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CheckError::Json(_)));
    }
}
