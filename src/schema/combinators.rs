//! Schema combinators.
//!
//! - [`LiteralSchema`]: exactly one JSON value
//! - [`EnumSchema`]: one of a fixed set of strings
//! - [`UnionSchema`]: the first matching member wins
//! - [`DiscriminatedUnionSchema`]: a tag field selects the variant
//! - [`OptionalSchema`]: `null` or the inner schema
//!
//! # Example
//!
//! ```rust
//! use verdict::{JsonPath, Schema};
//! use serde_json::json;
//!
//! let pet = Schema::discriminated_union("kind")
//!     .variant("cat", Schema::object().field("lives", Schema::number().int()))
//!     .variant("dog", Schema::object().field("good", Schema::literal(json!(true))));
//!
//! assert!(pet.validate(&json!({"kind": "cat", "lives": 9}), &JsonPath::root()).is_success());
//!
//! let errors = pet.validate(&json!({}), &JsonPath::root()).into_result().unwrap_err();
//! assert_eq!(errors.first().path.to_string(), "kind");
//! ```

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::object::ObjectSchema;
use super::traits::{value_type_name, SchemaLike, ValueValidator};

/// Accepts exactly one JSON value.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    expected: Value,
    message: Option<String>,
}

impl LiteralSchema {
    /// Creates a schema accepting only `expected`.
    pub fn new(expected: Value) -> Self {
        Self {
            expected,
            message: None,
        }
    }

    /// Sets the mismatch message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if value == &self.expected {
            return Validation::Success(value.clone());
        }
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("Invalid literal value, expected {}", self.expected));
        Validation::Failure(SchemaErrors::single(
            SchemaError::new(path.clone(), message)
                .with_code(ErrorCode::InvalidLiteral)
                .with_expected(self.expected.to_string())
                .with_got(value.to_string()),
        ))
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn required_message(&self) -> Option<String> {
        self.message.clone()
    }
}

/// Accepts one of a fixed, ordered set of strings.
///
/// Without a custom message the failure is coded
/// [`InvalidEnumValue`](ErrorCode::InvalidEnumValue) and lists the options,
/// so the default message strategy can render them. A custom message is
/// reported verbatim.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    options: Vec<String>,
    message: Option<String>,
}

impl EnumSchema {
    /// Creates a schema accepting any of `options`.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Sets the mismatch message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        if let Some(s) = value.as_str() {
            if self.options.iter().any(|o| o == s) {
                return Validation::Success(s.to_string());
            }
        }

        let error = match &self.message {
            Some(message) => SchemaError::new(path.clone(), message.clone()),
            None => SchemaError::new(
                path.clone(),
                format!(
                    "Invalid enum value. Expected {}, received {}",
                    self.options.join(" | "),
                    value
                ),
            )
            .with_code(ErrorCode::InvalidEnumValue {
                options: self.options.clone(),
            }),
        };
        Validation::Failure(SchemaErrors::single(
            error
                .with_expected(self.options.join(" | "))
                .with_got(value_type_name(value)),
        ))
    }
}

impl SchemaLike for EnumSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::String)
    }

    fn required_message(&self) -> Option<String> {
        self.message.clone()
    }
}

/// Accepts a value matching any member; the first match wins.
///
/// Member failures are not reported. When nothing matches, one
/// [`NoUnionMatch`](ErrorCode::NoUnionMatch) error is reported at the
/// union's path.
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let id = Schema::union()
///     .member(Schema::string().min_len(1))
///     .member(Schema::number().int())
///     .error("id must be a string or an integer");
///
/// assert!(id.validate(&json!("abc"), &JsonPath::root()).is_success());
/// assert!(id.validate(&json!(7), &JsonPath::root()).is_success());
///
/// let errors = id.validate(&json!(true), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "id must be a string or an integer");
/// ```
pub struct UnionSchema {
    members: Vec<Box<dyn ValueValidator>>,
    message: Option<String>,
}

impl UnionSchema {
    /// Creates a union with no members, which matches nothing.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            message: None,
        }
    }

    /// Appends a member.
    pub fn member<S: SchemaLike + 'static>(mut self, schema: S) -> Self {
        self.members.push(Box::new(schema));
        self
    }

    /// Sets the message reported when no member matches.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        for member in &self.members {
            if let Validation::Success(v) = member.validate_value(value, path) {
                return Validation::Success(v);
            }
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Invalid input".to_string());
        Validation::Failure(SchemaErrors::single(
            SchemaError::new(path.clone(), message)
                .with_code(ErrorCode::NoUnionMatch)
                .with_expected(format!("one of {} members", self.members.len()))
                .with_got(value_type_name(value)),
        ))
    }
}

impl Default for UnionSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn required_message(&self) -> Option<String> {
        self.message.clone()
    }
}

/// A tagged union of object schemas.
///
/// The string at `discriminator` selects the variant. A missing, non-string
/// or unknown tag reports [`InvalidDiscriminator`](ErrorCode::InvalidDiscriminator)
/// at the tag's path with the accepted tags in declaration order; otherwise
/// the selected variant's errors are reported unchanged.
pub struct DiscriminatedUnionSchema {
    discriminator: String,
    variants: IndexMap<String, ObjectSchema>,
    type_error_message: Option<String>,
}

impl DiscriminatedUnionSchema {
    /// Creates a tagged union keyed by `discriminator`.
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            variants: IndexMap::new(),
            type_error_message: None,
        }
    }

    /// Adds the variant selected by `tag`.
    pub fn variant(mut self, tag: impl Into<String>, schema: ObjectSchema) -> Self {
        self.variants.insert(tag.into(), schema);
        self
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the accepted tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Validates a value against this schema.
    ///
    /// The discriminator is kept in the output even when the variant schema
    /// does not declare it.
    pub fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected object".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(ErrorCode::InvalidType)
                        .with_got(value_type_name(value))
                        .with_expected("object"),
                ));
            }
        };

        let tag = obj.get(&self.discriminator);
        let variant = tag
            .and_then(Value::as_str)
            .and_then(|t| self.variants.get_key_value(t));

        match variant {
            Some((tag, schema)) => {
                let validated = if schema.declares(&self.discriminator) {
                    schema.validate(value, path)
                } else {
                    // The tag is not an unknown property of the variant.
                    let mut rest = obj.clone();
                    rest.remove(&self.discriminator);
                    schema.validate(&Value::Object(rest), path)
                };
                validated.map(|mut out| {
                    out.entry(self.discriminator.clone())
                        .or_insert_with(|| Value::String(tag.clone()));
                    out
                })
            }
            None => {
                let options: Vec<String> = self.variants.keys().cloned().collect();
                let got = tag.map_or_else(|| "nothing".to_string(), Value::to_string);
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        path.push_field(&self.discriminator),
                        "Invalid discriminator value",
                    )
                    .with_code(ErrorCode::InvalidDiscriminator { options })
                    .with_expected(self.variants.keys().cloned().collect::<Vec<_>>().join(" | "))
                    .with_got(got),
                ))
            }
        }
    }
}

impl SchemaLike for DiscriminatedUnionSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Object)
    }

    fn required_message(&self) -> Option<String> {
        self.type_error_message.clone()
    }
}

/// Accepts `null` or a value matching the inner schema.
pub struct OptionalSchema<S> {
    inner: S,
}

impl<S: SchemaLike> OptionalSchema<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if value.is_null() {
            Validation::Success(Value::Null)
        } else {
            self.inner.validate_to_value(value, path)
        }
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn required_message(&self) -> Option<String> {
        self.inner.required_message()
    }
}
