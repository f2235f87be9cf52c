//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects with
//! typed fields, optional fields, defaults, unknown-property handling and
//! cross-field checks.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

type CrossFieldCheck =
    Box<dyn Fn(&Map<String, Value>, &JsonPath) -> Validation<(), SchemaErrors> + Send + Sync>;

struct FieldDef {
    schema: Box<dyn SchemaLike<Output = Value>>,
    required: bool,
    default: Option<Value>,
}

/// How to handle properties not defined in the schema.
enum AdditionalProperties {
    Allow,
    Deny,
    Validate(Box<dyn SchemaLike<Output = Value>>),
}

/// A schema for validating JSON objects.
///
/// All field failures are accumulated. Missing required fields are reported
/// at the field's path with the field schema's required message when it has
/// one. Cross-field checks added with [`custom`](ObjectSchema::custom) run
/// only once every field is valid.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().error("expected string"))
///     .field("quantity", Schema::number().int())
///     .optional("note", Schema::string())
///     .additional_properties(false);
///
/// let result = schema.validate(&json!({"name": "Widget", "quantity": 3}), &JsonPath::root());
/// assert!(result.is_success());
///
/// let result = schema.validate(&json!({"name": 12, "quantity": 3}), &JsonPath::root());
/// let errors = result.into_result().unwrap_err();
/// assert_eq!(errors.first().message, "expected string");
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, FieldDef>,
    additional_properties: AdditionalProperties,
    cross_field: Vec<CrossFieldCheck>,
    type_error_message: Option<String>,
    required_message: Option<String>,
}

impl ObjectSchema {
    /// Creates an object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            additional_properties: AdditionalProperties::Allow,
            cross_field: Vec::new(),
            type_error_message: None,
            required_message: None,
        }
    }

    /// Adds a required field.
    pub fn field<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.insert(name.into(), schema, true, None)
    }

    /// Adds a field that may be absent.
    ///
    /// ```rust
    /// use verdict::{JsonPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object().optional("nickname", Schema::string());
    /// assert!(schema.validate(&json!({}), &JsonPath::root()).is_success());
    /// ```
    pub fn optional<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.insert(name.into(), schema, false, None)
    }

    /// Adds a field that takes `default` when absent.
    pub fn default<S>(self, name: impl Into<String>, schema: S, default: Value) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.insert(name.into(), schema, false, Some(default))
    }

    fn insert<S>(mut self, name: String, schema: S, required: bool, default: Option<Value>) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(
            name,
            FieldDef {
                schema: Box::new(SchemaWrapper(schema)),
                required,
                default,
            },
        );
        self
    }

    /// Configures how unknown properties are handled.
    ///
    /// Accepts `true` (allow, the default), `false` (reject) or a schema
    /// every unknown property must satisfy.
    pub fn additional_properties<S>(mut self, setting: S) -> Self
    where
        S: Into<AdditionalPropertiesSetting>,
    {
        self.additional_properties = setting.into().0;
        self
    }

    /// Adds a cross-field check over the validated object.
    ///
    /// Checks run in insertion order after all fields pass, and their
    /// failures accumulate.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Map<String, Value>, &JsonPath) -> Validation<(), SchemaErrors>
            + Send
            + Sync
            + 'static,
    {
        self.cross_field.push(Box::new(check));
        self
    }

    /// Requires `field` whenever `when` holds for the value of `condition`.
    ///
    /// ```rust
    /// use verdict::{JsonPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("method", Schema::string())
    ///     .optional("card_number", Schema::string())
    ///     .require_if("method", |v| v == &json!("card"), "card_number");
    ///
    /// assert!(schema.validate(&json!({"method": "cash"}), &JsonPath::root()).is_success());
    /// assert!(schema.validate(&json!({"method": "card"}), &JsonPath::root()).is_failure());
    /// ```
    pub fn require_if<P>(
        self,
        condition: impl Into<String>,
        when: P,
        field: impl Into<String>,
    ) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let condition = condition.into();
        let field = field.into();
        self.custom(move |obj, path| {
            let triggered = obj.get(&condition).is_some_and(&when);
            if triggered && !obj.contains_key(&field) {
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        path.push_field(&field),
                        format!("'{}' is required when '{}' is set", field, condition),
                    )
                    .with_code(ErrorCode::Required)
                    .with_expected("value"),
                ))
            } else {
                Validation::Success(())
            }
        })
    }

    /// Sets the message used when the value is not an object.
    ///
    /// It is also the required message when this object is a missing field
    /// of a parent object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Sets the message used when this object is a missing field.
    pub fn required_error(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    pub(crate) fn declares(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Validates a value against this schema.
    ///
    /// The output map holds validated field values in schema order, followed
    /// by allowed unknown properties.
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

        let mut errors = Vec::new();
        let mut validated = Map::new();

        for (name, field_def) in &self.fields {
            let field_path = path.push_field(name);

            match obj.get(name) {
                Some(field_value) => {
                    match field_def.schema.validate_to_value(field_value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => errors.extend(e),
                    }
                }
                None if field_def.required => {
                    let message = field_def
                        .schema
                        .required_message()
                        .unwrap_or_else(|| format!("required field '{}' is missing", name));
                    errors.push(
                        SchemaError::new(field_path, message)
                            .with_code(ErrorCode::Required)
                            .with_expected("value"),
                    );
                }
                None => {
                    if let Some(default) = &field_def.default {
                        validated.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        for (key, value) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            let field_path = path.push_field(key);
            match &self.additional_properties {
                AdditionalProperties::Allow => {
                    validated.insert(key.clone(), value.clone());
                }
                AdditionalProperties::Deny => {
                    errors.push(
                        SchemaError::new(field_path, format!("unknown field '{}'", key))
                            .with_code(ErrorCode::AdditionalProperty),
                    );
                }
                AdditionalProperties::Validate(schema) => {
                    match schema.validate_to_value(value, &field_path) {
                        Validation::Success(v) => {
                            validated.insert(key.clone(), v);
                        }
                        Validation::Failure(e) => errors.extend(e),
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Validation::Failure(SchemaErrors::from_vec(errors));
        }

        for check in &self.cross_field {
            if let Validation::Failure(e) = check(&validated, path) {
                errors.extend(e);
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Object)
    }

    fn required_message(&self) -> Option<String> {
        self.required_message
            .clone()
            .or_else(|| self.type_error_message.clone())
    }
}

/// Adapts any `SchemaLike` to `Value` output so fields of different schema
/// types fit in one map.
pub(crate) struct SchemaWrapper<S>(pub(crate) S);

impl<S: SchemaLike> SchemaLike for SchemaWrapper<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.0.validate_to_value(value, path)
    }

    fn required_message(&self) -> Option<String> {
        self.0.required_message()
    }
}

/// Conversion target for [`ObjectSchema::additional_properties`].
///
/// `bool` maps to allow/deny; any schema validates unknown properties.
pub struct AdditionalPropertiesSetting(AdditionalProperties);

impl From<bool> for AdditionalPropertiesSetting {
    fn from(allow: bool) -> Self {
        if allow {
            AdditionalPropertiesSetting(AdditionalProperties::Allow)
        } else {
            AdditionalPropertiesSetting(AdditionalProperties::Deny)
        }
    }
}

impl<S: SchemaLike + 'static> From<S> for AdditionalPropertiesSetting {
    fn from(schema: S) -> Self {
        AdditionalPropertiesSetting(AdditionalProperties::Validate(Box::new(SchemaWrapper(
            schema,
        ))))
    }
}
