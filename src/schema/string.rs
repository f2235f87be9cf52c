//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length bounds, regex patterns, custom refinements and an optional trim.

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

type StringCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    Refine {
        check: StringCheck,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// Every constraint is checked and all violations are reported together.
/// With [`trim`](StringSchema::trim) the value is trimmed before the
/// constraints run, and the trimmed string is the output.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .error("Property 'description' should be a string")
///     .trim()
///     .max_len(8)
///     .error("too long");
///
/// let result = schema.validate(&json!("  short  "), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap(), "short");
///
/// let result = schema.validate(&json!(12), &JsonPath::root());
/// assert!(result.is_failure());
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    trim: bool,
    type_error_message: Option<String>,
    required_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            trim: false,
            type_error_message: None,
            required_message: None,
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires at least one character.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires a match of `pattern`.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints
            .push(StringConstraint::Pattern { regex, message: None });
        Ok(self)
    }

    /// Adds a custom check; failures report `message`.
    ///
    /// ```rust
    /// use verdict::{JsonPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().refine(|s| s.chars().all(|c| c.is_ascii_digit()), "digits only");
    /// assert!(schema.validate(&json!("0123"), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!("01a3"), &JsonPath::root()).is_failure());
    /// ```
    pub fn refine<F>(mut self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.constraints.push(StringConstraint::Refine {
            check: Arc::new(check),
            message: Some(message.into()),
        });
        self
    }

    /// Trims surrounding whitespace before checking constraints.
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Sets the message for the most recent constraint.
    ///
    /// Before any constraint is added, this sets the type error message, which
    /// is also used when an object field with this schema is missing.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. }
                | StringConstraint::MaxLength { message: m, .. }
                | StringConstraint::Pattern { message: m, .. }
                | StringConstraint::Refine { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Sets the message used when an object field with this schema is missing.
    pub fn required_error(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) if self.trim => s.trim(),
            Some(s) => s,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected string".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(ErrorCode::InvalidType)
                        .with_got(value_type_name(value))
                        .with_expected("string"),
                ));
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        if errors.is_empty() {
            Validation::Success(s.to_string())
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::String)
    }

    fn required_message(&self) -> Option<String> {
        self.required_message
            .clone()
            .or_else(|| self.type_error_message.clone())
    }
}

fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                SchemaError::new(path.clone(), msg)
                    .with_code(ErrorCode::MinLength)
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                SchemaError::new(path.clone(), msg)
                    .with_code(ErrorCode::MaxLength)
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must match pattern '{}'", regex.as_str()));
            SchemaError::new(path.clone(), msg)
                .with_code(ErrorCode::Pattern)
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_got(value.to_string())
        }),
        StringConstraint::Refine { check, message } => (!check(value)).then(|| {
            let msg = message.clone().unwrap_or_else(|| "invalid value".to_string());
            SchemaError::new(path.clone(), msg).with_code(ErrorCode::Custom)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_rejects_non_string() {
        let errors = unwrap_failure(StringSchema::new().validate(&json!(42), &JsonPath::root()));
        assert_eq!(errors.first().code, ErrorCode::InvalidType);
        assert_eq!(errors.first().got.as_deref(), Some("number"));
        assert_eq!(errors.first().message, "expected string");
    }

    #[test]
    fn test_custom_type_message() {
        let schema = StringSchema::new().error("Property 'name' should be a string");
        let errors = unwrap_failure(schema.validate(&json!(null), &JsonPath::root()));
        assert_eq!(errors.first().message, "Property 'name' should be a string");
    }

    #[test]
    fn test_error_targets_last_constraint() {
        let schema = StringSchema::new()
            .error("not a string")
            .min_len(3)
            .error("too short");

        let errors = unwrap_failure(schema.validate(&json!("ab"), &JsonPath::root()));
        assert_eq!(errors.first().message, "too short");
        assert_eq!(errors.first().code, ErrorCode::MinLength);
    }

    #[test]
    fn test_accumulates_violations() {
        let schema = StringSchema::new().min_len(10).pattern(r"^\d+$").unwrap();
        let errors = unwrap_failure(schema.validate(&json!("abc"), &JsonPath::root()));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.with_code(&ErrorCode::Pattern).len(), 1);
    }

    #[test]
    fn test_trim_applies_before_length() {
        let schema = StringSchema::new().trim().max_len(3);
        let result = schema.validate(&json!("  abc  "), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), "abc");
    }

    #[test]
    fn test_unicode_length() {
        let schema = StringSchema::new().min_len(3).max_len(5);
        assert!(schema.validate(&json!("日本語"), &JsonPath::root()).is_success());
        assert!(schema.validate(&json!("🎉🎊"), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_refine_reports_custom_code() {
        let schema = StringSchema::new().refine(|s| s.len() == 11, "must have 11 characters");
        let errors = unwrap_failure(schema.validate(&json!("123"), &JsonPath::root()));
        assert_eq!(errors.first().code, ErrorCode::Custom);
        assert_eq!(errors.first().message, "must have 11 characters");
    }

    #[test]
    fn test_required_message_prefers_required_error() {
        let schema = StringSchema::new()
            .error("should be a string")
            .required_error("is required");
        assert_eq!(schema.required_message().as_deref(), Some("is required"));

        let schema = StringSchema::new().error("should be a string");
        assert_eq!(schema.required_message().as_deref(), Some("should be a string"));

        assert!(StringSchema::new().required_message().is_none());
    }

    #[test]
    fn test_invalid_regex_pattern() {
        assert!(StringSchema::new().pattern(r"[invalid").is_err());
    }

    #[test]
    fn test_path_tracking() {
        let path = JsonPath::root().push_field("user").push_field("name");
        let errors = unwrap_failure(StringSchema::new().min_len(5).validate(&json!("ab"), &path));
        assert_eq!(errors.first().path.to_string(), "user.name");
    }
}
