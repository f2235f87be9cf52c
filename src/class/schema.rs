//! Class schemas: ordered rule lists per property.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::options::ClassValidatorOptions;
use super::rule::Rule;

type ObjectCheck = Arc<dyn Fn(&Map<String, Value>) -> bool + Send + Sync>;

/// The failures of one property, as the class engine reports them.
///
/// `constraints` maps rule names to rendered messages. Rules are evaluated
/// from the last declared to the first, so the outermost declared rule is
/// the last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyError {
    /// The property name.
    pub property: String,
    /// The candidate value, `None` when absent.
    pub value: Option<Value>,
    /// Failed rules, innermost first.
    pub constraints: IndexMap<String, String>,
    /// Failures inside a nested class schema.
    pub children: Vec<PropertyError>,
}

impl PropertyError {
    fn new(property: &str, value: Option<&Value>) -> Self {
        Self {
            property: property.to_string(),
            value: value.cloned(),
            constraints: IndexMap::new(),
            children: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.children.is_empty()
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.property)?;
        if !self.constraints.is_empty() {
            let messages: Vec<&str> = self.constraints.values().map(String::as_str).collect();
            write!(f, ": {}", messages.join("; "))?;
        }
        if !self.children.is_empty() {
            write!(f, " ({} nested)", self.children.len())?;
        }
        Ok(())
    }
}

/// A rule over the whole candidate object, reported on one property.
///
/// With [`when`](Refinement::when), the check only runs if the predicate
/// holds. Failures are added under the `refinement` key after the
/// property's own rules, so they take precedence in the default mapping.
///
/// ```rust
/// use serde_json::json;
/// use verdict::class::Refinement;
///
/// let card = Refinement::new(
///     "card_number",
///     |obj| obj.get("card_number").is_some_and(|v| v.is_string()),
///     "card_number is required for card payments",
/// )
/// .when(|obj| obj.get("method") == Some(&json!("card")));
/// # let _ = card;
/// ```
#[derive(Clone)]
pub struct Refinement {
    path: String,
    predicate: Option<ObjectCheck>,
    check: ObjectCheck,
    message: String,
}

impl Refinement {
    /// Creates an unconditional refinement reported on `path`.
    pub fn new<F>(path: impl Into<String>, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            predicate: None,
            check: Arc::new(check),
            message: message.into(),
        }
    }

    /// Only run the check when `predicate` holds.
    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    fn fails(&self, candidate: &Map<String, Value>) -> bool {
        let active = self.predicate.as_ref().map_or(true, |p| p(candidate));
        active && !(self.check)(candidate)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("path", &self.path)
            .field("conditional", &self.predicate.is_some())
            .field("message", &self.message)
            .finish()
    }
}

#[derive(Debug, Clone)]
struct PropertyDef {
    rules: Vec<Rule>,
    nested: Option<ClassSchema>,
}

/// A declared shape: properties with ordered rules, nested schemas and
/// whole-object refinements.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::class::{ClassSchema, ClassValidatorOptions, Rule};
///
/// let schema = ClassSchema::new().property(
///     "name",
///     [
///         Rule::is_not_empty(),
///         Rule::is_string().with_message("expected string"),
///         Rule::min_length(2),
///     ],
/// );
///
/// let errors = schema
///     .validate(&json!({"name": 12}), &ClassValidatorOptions::default())
///     .unwrap_err();
/// let names: Vec<_> = errors[0].constraints.keys().map(String::as_str).collect();
/// assert_eq!(names, vec!["minLength", "isString"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassSchema {
    properties: IndexMap<String, PropertyDef>,
    refinements: Vec<Refinement>,
}

impl ClassSchema {
    /// Creates a schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property with its rules, outermost first.
    pub fn property<I>(mut self, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.properties.insert(
            name.into(),
            PropertyDef {
                rules: rules.into_iter().collect(),
                nested: None,
            },
        );
        self
    }

    /// Declares a property holding a nested schema.
    ///
    /// The nested candidate is always built, from an empty object when the
    /// input lacks it, so `rules` see an object and the nested rules still
    /// run.
    pub fn nested<I>(mut self, name: impl Into<String>, schema: ClassSchema, rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.properties.insert(
            name.into(),
            PropertyDef {
                rules: rules.into_iter().collect(),
                nested: Some(schema),
            },
        );
        self
    }

    /// Adds a whole-object refinement.
    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Declared property names in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Builds the candidate object from raw input.
    ///
    /// Declared properties are copied (nested ones instantiated
    /// recursively); undeclared ones are kept only without `whitelist`.
    /// Non-object input is treated as an empty object.
    pub fn instantiate(&self, raw: &Value, options: &ClassValidatorOptions) -> Map<String, Value> {
        let empty = Map::new();
        let raw = raw.as_object().unwrap_or(&empty);
        let mut candidate = Map::new();

        for (name, def) in &self.properties {
            match &def.nested {
                Some(schema) => {
                    let child = raw.get(name).unwrap_or(&Value::Null);
                    candidate.insert(name.clone(), Value::Object(schema.instantiate(child, options)));
                }
                None => {
                    if let Some(value) = raw.get(name) {
                        candidate.insert(name.clone(), value.clone());
                    }
                }
            }
        }

        if !options.whitelist {
            for (key, value) in raw {
                if !self.properties.contains_key(key) {
                    candidate.insert(key.clone(), value.clone());
                }
            }
        }

        candidate
    }

    /// Instantiates and checks `raw`.
    ///
    /// Returns the candidate when nothing fails, otherwise the property
    /// errors in declaration order, followed by undeclared properties when
    /// `forbid_non_whitelisted` is set.
    pub fn validate(
        &self,
        raw: &Value,
        options: &ClassValidatorOptions,
    ) -> Result<Map<String, Value>, Vec<PropertyError>> {
        let candidate = self.instantiate(raw, options);
        let errors = self.check(raw, &candidate, options);
        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(errors)
        }
    }

    fn check(
        &self,
        raw: &Value,
        candidate: &Map<String, Value>,
        options: &ClassValidatorOptions,
    ) -> Vec<PropertyError> {
        let mut errors: Vec<PropertyError> = Vec::new();

        for (name, def) in &self.properties {
            let value = candidate.get(name);
            let checked = value.unwrap_or(&Value::Null);
            let mut error = PropertyError::new(name, value);

            if !(options.skip_missing_properties && checked.is_null()) {
                for rule in def.rules.iter().rev() {
                    if !rule.check(checked) {
                        error
                            .constraints
                            .insert(rule.name().to_string(), rule.message_for(name));
                    }
                }
            }

            if let (Some(schema), Some(Value::Object(child))) = (&def.nested, value) {
                let child_raw = raw.get(name).unwrap_or(&Value::Null);
                error.children = schema.check(child_raw, child, options);
            }

            if !error.is_empty() {
                errors.push(error);
            }
        }

        for refinement in &self.refinements {
            if !refinement.fails(candidate) {
                continue;
            }
            let position = errors.iter().position(|e| e.property == refinement.path);
            let error = match position {
                Some(index) => &mut errors[index],
                None => {
                    errors.push(PropertyError::new(
                        &refinement.path,
                        candidate.get(&refinement.path),
                    ));
                    let last = errors.len() - 1;
                    &mut errors[last]
                }
            };
            error
                .constraints
                .insert("refinement".to_string(), refinement.message.clone());
        }

        if options.whitelist && options.forbid_non_whitelisted {
            if let Some(raw) = raw.as_object() {
                for (key, value) in raw {
                    if self.properties.contains_key(key) {
                        continue;
                    }
                    let mut error = PropertyError::new(key, Some(value));
                    error.constraints.insert(
                        "whitelistValidation".to_string(),
                        format!("property {} should not exist", key),
                    );
                    errors.push(error);
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ClassValidatorOptions {
        ClassValidatorOptions::default()
    }

    #[test]
    fn test_instantiate_projects_declared_properties() {
        let schema = ClassSchema::new().property("name", [Rule::is_string()]);
        let candidate = schema.instantiate(&json!({"name": "a", "extra": 1}), &options());
        assert_eq!(Value::Object(candidate), json!({"name": "a"}));

        let loose = ClassValidatorOptions {
            whitelist: false,
            ..options()
        };
        let candidate = schema.instantiate(&json!({"name": "a", "extra": 1}), &loose);
        assert_eq!(candidate.get("extra"), Some(&json!(1)));
    }

    #[test]
    fn test_instantiate_builds_missing_nested() {
        let inner = ClassSchema::new().property("time", [Rule::is_date_string()]);
        let schema = ClassSchema::new().nested("config", inner, [Rule::is_not_empty()]);
        let candidate = schema.instantiate(&json!("not an object"), &options());
        assert_eq!(Value::Object(candidate), json!({"config": {}}));
    }

    #[test]
    fn test_rules_evaluated_innermost_first() {
        let schema = ClassSchema::new().property(
            "quantity",
            [
                Rule::is_not_empty().with_message("expected quantity"),
                Rule::is_number().with_message("expected number"),
                Rule::is_int().with_message("expected integer"),
            ],
        );
        let errors = schema.validate(&json!({}), &options()).unwrap_err();
        let messages: Vec<_> = errors[0].constraints.values().cloned().collect();
        assert_eq!(messages, vec!["expected integer", "expected number", "expected quantity"]);
        assert_eq!(errors[0].value, None);
    }

    #[test]
    fn test_nested_errors_become_children() {
        let inner = ClassSchema::new().property("time", [Rule::is_date_string()]);
        let schema = ClassSchema::new().nested("nested", inner, [Rule::is_not_empty()]);

        let errors = schema.validate(&json!({"nested": {"time": 5}}), &options()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].constraints.is_empty());
        assert_eq!(errors[0].children[0].property, "time");
    }

    #[test]
    fn test_skip_missing_properties() {
        let schema = ClassSchema::new().property("nickname", [Rule::is_not_empty(), Rule::is_string()]);
        let skip = ClassValidatorOptions {
            skip_missing_properties: true,
            ..options()
        };
        assert!(schema.validate(&json!({}), &skip).is_ok());
        assert!(schema.validate(&json!({"nickname": 3}), &skip).is_err());
    }

    #[test]
    fn test_forbid_non_whitelisted() {
        let schema = ClassSchema::new().property("name", [Rule::is_string()]);
        let strict = ClassValidatorOptions {
            forbid_non_whitelisted: true,
            ..options()
        };
        let errors = schema
            .validate(&json!({"name": "a", "admin": true}), &strict)
            .unwrap_err();
        assert_eq!(errors[0].property, "admin");
        assert_eq!(
            errors[0].constraints.get("whitelistValidation").map(String::as_str),
            Some("property admin should not exist")
        );
    }

    #[test]
    fn test_refinement_when() {
        let schema = ClassSchema::new()
            .property("method", [Rule::is_string()])
            .property("card_number", Vec::<Rule>::new())
            .refine(
                Refinement::new(
                    "card_number",
                    |obj| obj.get("card_number").is_some_and(Value::is_string),
                    "card_number is required for card payments",
                )
                .when(|obj| obj.get("method") == Some(&json!("card"))),
            );

        assert!(schema.validate(&json!({"method": "cash"}), &options()).is_ok());

        let errors = schema.validate(&json!({"method": "card"}), &options()).unwrap_err();
        assert_eq!(errors[0].property, "card_number");
        assert_eq!(
            errors[0].constraints.get("refinement").map(String::as_str),
            Some("card_number is required for card payments")
        );
    }

    #[test]
    fn test_refinement_merges_into_existing_error() {
        let schema = ClassSchema::new()
            .property("end", [Rule::is_int()])
            .refine(Refinement::new("end", |_| false, "end must follow start"));

        let errors = schema.validate(&json!({"end": 1.5}), &options()).unwrap_err();
        assert_eq!(errors.len(), 1);
        let keys: Vec<_> = errors[0].constraints.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["isInt", "refinement"]);
    }
}
