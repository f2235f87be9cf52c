//! The built-in schema engine.
//!
//! Schemas validate `serde_json::Value`s and accumulate every failure as a
//! [`SchemaError`](crate::SchemaError) with a path from the root. They are
//! one of the two validation backends the crate ships; wrap one in a
//! [`SchemaValidator`](crate::adapters::SchemaValidator) to get canonical
//! constraint trees.
//!
//! # Example
//!
//! ```rust
//! use verdict::{JsonPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::string().min_len(1).max_len(100);
//!
//! let result = schema.validate(&json!("hello"), &JsonPath::root());
//! assert!(result.is_success());
//! ```

mod array;
mod combinators;
mod numeric;
mod object;
mod string;
mod traits;

pub use array::{ArraySchema, TupleSchema};
pub use combinators::{
    DiscriminatedUnionSchema, EnumSchema, LiteralSchema, OptionalSchema, UnionSchema,
};
pub use numeric::NumberSchema;
pub use object::{AdditionalPropertiesSetting, ObjectSchema};
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};

use serde_json::Value;

/// Entry point for building schemas.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let order = Schema::object()
///     .field("name", Schema::string().error("expected string"))
///     .field(
///         "config",
///         Schema::object()
///             .field("quantity", Schema::number().error("expected number"))
///             .field("nested", Schema::object().field("time", Schema::string().error("expected string"))),
///     );
///
/// let result = order.validate(&json!({"name": 12, "config": {"nested": {}}}), &JsonPath::root());
/// assert_eq!(result.into_result().unwrap_err().len(), 3);
/// ```
pub struct Schema;

impl Schema {
    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number schema accepting integers and floats.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a number schema that only accepts whole numbers.
    ///
    /// Shorthand for `Schema::number().int()`; a following `.error()` targets
    /// the integer check.
    pub fn integer() -> NumberSchema {
        NumberSchema::new().int()
    }

    /// Creates an object schema.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an array schema whose items must match `items`.
    pub fn array<S: SchemaLike>(items: S) -> ArraySchema<S> {
        ArraySchema::new(items)
    }

    /// Creates an empty tuple schema; add positions with `.item()`.
    pub fn tuple() -> TupleSchema {
        TupleSchema::new()
    }

    /// Creates a schema accepting exactly `value`.
    pub fn literal(value: Value) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates a schema accepting one of `options`.
    pub fn enumeration<I, S>(options: I) -> EnumSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSchema::new(options)
    }

    /// Creates an empty union; add members with `.member()`.
    pub fn union() -> UnionSchema {
        UnionSchema::new()
    }

    /// Creates a tagged union keyed by `discriminator`.
    pub fn discriminated_union(discriminator: impl Into<String>) -> DiscriminatedUnionSchema {
        DiscriminatedUnionSchema::new(discriminator)
    }

    /// Wraps `inner` so that `null` is also accepted.
    pub fn optional<S: SchemaLike>(inner: S) -> OptionalSchema<S> {
        OptionalSchema::new(inner)
    }
}
