//! Validator backed by a [`ClassSchema`](crate::class::ClassSchema).
//!
//! Property errors are mapped to constraints through a [`PropertyErrorMapper`].

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::class::{ClassSchema, ClassValidatorOptions, PropertyError};
use crate::constraint::{ValidationConstraint, ValidationError};
use crate::outcome::Outcome;
use crate::validator::Validator;

/// Converts a class engine error tree into constraints.
///
/// Any `Fn(&[PropertyError]) -> Vec<ValidationConstraint> + Send + Sync`
/// closure is a mapper.
pub trait PropertyErrorMapper: Send + Sync {
    /// Maps `errors`, keeping their order.
    fn to_constraints(&self, errors: &[PropertyError]) -> Vec<ValidationConstraint>;
}

impl<F> PropertyErrorMapper for F
where
    F: Fn(&[PropertyError]) -> Vec<ValidationConstraint> + Send + Sync,
{
    fn to_constraints(&self, errors: &[PropertyError]) -> Vec<ValidationConstraint> {
        self(errors)
    }
}

/// One constraint per failing property.
///
/// A property with children recurses and becomes a nested constraint only
/// if the recursion produced something. A leaf keeps only the last message
/// of its constraint map, which is the outermost declared failing rule;
/// the other messages are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertyErrorMapper;

impl PropertyErrorMapper for DefaultPropertyErrorMapper {
    fn to_constraints(&self, errors: &[PropertyError]) -> Vec<ValidationConstraint> {
        let mut constraints = Vec::new();
        for error in errors {
            if !error.children.is_empty() {
                let nested = self.to_constraints(&error.children);
                if !nested.is_empty() {
                    constraints.push(ValidationConstraint::nested(&error.property, nested));
                }
                continue;
            }

            if let Some(message) = error.constraints.values().last() {
                constraints.push(ValidationConstraint::field(&error.property, message));
            }
        }
        constraints
    }
}

/// Validates input with a [`ClassSchema`].
///
/// The candidate object built by the schema is deserialized into `T` when
/// no rule fails.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use verdict::adapters::ClassValidator;
/// use verdict::class::{ClassSchema, Rule};
/// use verdict::{ValidationConstraint, Validator};
///
/// #[derive(Debug, Deserialize)]
/// struct Person {
///     name: String,
/// }
///
/// let validator = ClassValidator::<Person>::new(ClassSchema::new().property(
///     "name",
///     [
///         Rule::is_not_empty().with_message("Property 'name' is required"),
///         Rule::is_string().with_message("Property 'name' should be a string"),
///     ],
/// ));
///
/// assert!(validator.validate(&json!({"name": "Ana"})).is_success());
///
/// let error = validator.validate(&json!({})).unwrap_failure();
/// assert_eq!(
///     error.into_vec(),
///     vec![ValidationConstraint::field("name", "Property 'name' is required")]
/// );
/// ```
pub struct ClassValidator<T, M = DefaultPropertyErrorMapper> {
    schema: ClassSchema,
    options: ClassValidatorOptions,
    mapper: M,
    _target: PhantomData<fn() -> T>,
}

impl<T> ClassValidator<T> {
    /// Wraps `schema` with default options and the default mapper.
    pub fn new(schema: ClassSchema) -> Self {
        Self {
            schema,
            options: ClassValidatorOptions::default(),
            mapper: DefaultPropertyErrorMapper,
            _target: PhantomData,
        }
    }
}

impl<T, M: PropertyErrorMapper> ClassValidator<T, M> {
    /// Replaces the options.
    pub fn with_options(mut self, options: ClassValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the error mapper.
    pub fn with_mapper<N: PropertyErrorMapper>(self, mapper: N) -> ClassValidator<T, N> {
        ClassValidator {
            schema: self.schema,
            options: self.options,
            mapper,
            _target: PhantomData,
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &ClassValidatorOptions {
        &self.options
    }
}

impl<T, M> Validator<T> for ClassValidator<T, M>
where
    T: DeserializeOwned,
    M: PropertyErrorMapper,
{
    fn validate(&self, input: &Value) -> Outcome<T, ValidationError> {
        match self.schema.validate(input, &self.options) {
            Ok(candidate) => match serde_json::from_value::<T>(Value::Object(candidate)) {
                Ok(parsed) => {
                    trace!("class validation succeeded");
                    Outcome::Success(parsed)
                }
                Err(e) => {
                    debug!(error = %e, "validated candidate does not fit the target type");
                    Outcome::Failure(ValidationError::root(e.to_string()))
                }
            },
            Err(errors) => {
                debug!(properties = errors.len(), "class validation failed");
                Outcome::Failure(ValidationError::new(self.mapper.to_constraints(&errors)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Rule;
    use indexmap::IndexMap;
    use serde_json::json;

    fn leaf(property: &str, messages: &[(&str, &str)]) -> PropertyError {
        PropertyError {
            property: property.to_string(),
            value: None,
            constraints: messages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_default_mapper_takes_last_message() {
        let errors = [leaf("name", &[("minLength", "too short"), ("isString", "expected string")])];
        assert_eq!(
            DefaultPropertyErrorMapper.to_constraints(&errors),
            vec![ValidationConstraint::field("name", "expected string")]
        );
    }

    #[test]
    fn test_default_mapper_drops_empty_nodes() {
        let mut parent = leaf("config", &[]);
        parent.children = vec![leaf("quantity", &[])];
        let errors = [parent, leaf("bare", &[])];
        assert!(DefaultPropertyErrorMapper.to_constraints(&errors).is_empty());
    }

    #[test]
    fn test_default_mapper_nests_children() {
        let mut parent = leaf("config", &[("isNotEmpty", "ignored")]);
        parent.children = vec![leaf("quantity", &[("isInt", "expected integer")])];
        assert_eq!(
            DefaultPropertyErrorMapper.to_constraints(&[parent]),
            vec![ValidationConstraint::nested(
                "config",
                vec![ValidationConstraint::field("quantity", "expected integer")]
            )]
        );
    }

    #[test]
    fn test_closure_mapper_keeps_every_message() {
        let validator = ClassValidator::<Value>::new(
            ClassSchema::new().property("name", [Rule::is_not_empty(), Rule::is_string()]),
        )
        .with_mapper(|errors: &[PropertyError]| {
            errors
                .iter()
                .flat_map(|e| {
                    e.constraints
                        .values()
                        .map(move |m| ValidationConstraint::field(&e.property, m))
                })
                .collect::<Vec<_>>()
        });

        let error = validator.validate(&json!({})).unwrap_failure();
        assert_eq!(error.len(), 2);
    }

    #[test]
    fn test_whitelist_strips_unknown_properties() {
        let validator =
            ClassValidator::<Value>::new(ClassSchema::new().property("name", [Rule::is_string()]));
        let value = validator.validate(&json!({"name": "a", "role": "admin"})).unwrap();
        assert_eq!(value, json!({"name": "a"}));
    }
}
