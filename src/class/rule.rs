//! Property rules for the class engine.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

type Check = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named check on a single property value.
///
/// The message may contain `$property`, which is replaced with the property
/// name when the rule fails. Absent properties are checked as `null`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::class::Rule;
///
/// let rule = Rule::min_length(2).with_message("$property is too short");
/// assert!(rule.check(&json!("ab")));
/// assert!(!rule.check(&json!("a")));
/// assert_eq!(rule.message_for("name"), "name is too short");
/// ```
#[derive(Clone)]
pub struct Rule {
    name: String,
    check: Check,
    message: String,
}

impl Rule {
    /// Creates a rule from a name, a check and a message template.
    pub fn new<F>(name: impl Into<String>, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// Creates a user-defined rule with a generic message.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use verdict::class::Rule;
    ///
    /// let even = Rule::custom("isEven", |v| v.as_i64().is_some_and(|n| n % 2 == 0))
    ///     .with_message("$property must be even");
    /// assert!(even.check(&json!(4)));
    /// ```
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("$property failed {} validation", name);
        Self::new(name, check, message)
    }

    /// Replaces the message template.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The rule name, used as the constraint key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check.
    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    /// Renders the message for `property`.
    pub fn message_for(&self, property: &str) -> String {
        self.message.replace("$property", property)
    }

    /// Fails on `null`, absent values and the empty string.
    pub fn is_not_empty() -> Self {
        Self::new(
            "isNotEmpty",
            |v| !v.is_null() && v.as_str() != Some(""),
            "$property should not be empty",
        )
    }

    /// Fails on `null` and absent values.
    pub fn is_defined() -> Self {
        Self::new(
            "isDefined",
            |v| !v.is_null(),
            "$property should not be null or undefined",
        )
    }

    /// Requires a string.
    pub fn is_string() -> Self {
        Self::new("isString", Value::is_string, "$property must be a string")
    }

    /// Requires a boolean.
    pub fn is_boolean() -> Self {
        Self::new("isBoolean", Value::is_boolean, "$property must be a boolean value")
    }

    /// Requires a number.
    pub fn is_number() -> Self {
        Self::new(
            "isNumber",
            Value::is_number,
            "$property must be a number conforming to the specified constraints",
        )
    }

    /// Requires a whole number.
    pub fn is_int() -> Self {
        Self::new(
            "isInt",
            |v| match v {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            "$property must be an integer number",
        )
    }

    /// Requires a string of at least `min` characters.
    pub fn min_length(min: usize) -> Self {
        Self::new(
            "minLength",
            move |v| v.as_str().is_some_and(|s| s.chars().count() >= min),
            format!("$property must be longer than or equal to {} characters", min),
        )
    }

    /// Requires a string of at most `max` characters.
    pub fn max_length(max: usize) -> Self {
        Self::new(
            "maxLength",
            move |v| v.as_str().is_some_and(|s| s.chars().count() <= max),
            format!("$property must be shorter than or equal to {} characters", max),
        )
    }

    /// Requires an ISO 8601 date (`2024-05-01`) or RFC 3339 date-time string.
    pub fn is_date_string() -> Self {
        Self::new(
            "isDateString",
            |v| v.as_str().is_some_and(is_iso_date),
            "$property must be a valid ISO 8601 date string",
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

fn is_iso_date(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
