//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] lets schemas of different types be nested inside objects,
//! tuples and unions. [`ValueValidator`] is its type-erased form.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;

/// A schema that validates JSON values.
///
/// The `Send + Sync` bounds let schemas be shared across threads behind a
/// validator adapter.
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates `value`, reporting every failure found at or below `path`.
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors>;

    /// Validates `value` and returns the (possibly coerced) output as a `Value`.
    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors>;

    /// Message to report when an object field using this schema is absent.
    ///
    /// `None` falls back to the object's generic "required" message.
    fn required_message(&self) -> Option<String> {
        None
    }
}

/// A type-erased schema producing `Value` output.
///
/// Every [`SchemaLike`] is a `ValueValidator`, which is what heterogeneous
/// collections (union members, tuple items) store.
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate_to_value(value, path)
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
