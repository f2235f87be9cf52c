//! # Verdict
//!
//! Validation outcomes and adapters that turn the errors of different
//! validation engines into one nested constraint tree.
//!
//! ## Overview
//!
//! Every validator returns an [`Outcome`]: either the validated value or a
//! [`ValidationError`], a list of [`ValidationConstraint`]s where each entry
//! is a field message or a nested list for a sub-object. How the engine
//! reported the problem does not leak through.
//!
//! Two engines ship with the crate:
//!
//! - the schema engine ([`Schema`]) reports flat, path-addressed errors that
//!   [`adapters::SchemaValidator`] folds into a tree with the [`Normalizer`];
//! - the class engine ([`class::ClassSchema`]) reports a per-property error
//!   tree that [`adapters::ClassValidator`] maps with a
//!   [`PropertyErrorMapper`](adapters::PropertyErrorMapper).
//!
//! [`Input`] pairs raw input with a validator, and an [`Operator`] runs a
//! business step only once its input is valid, turning failures into an
//! [`ApiValidationError`].
//!
//! ## Example
//!
//! ```rust
//! use serde_json::{json, Value};
//! use verdict::{adapters::SchemaValidator, Schema, ValidationConstraint, Validator};
//!
//! let validator = SchemaValidator::<Value>::new(
//!     Schema::object()
//!         .field("name", Schema::string().error("expected string"))
//!         .field(
//!             "config",
//!             Schema::object()
//!                 .field("quantity", Schema::number().error("expected number"))
//!                 .field(
//!                     "nested",
//!                     Schema::object().field("time", Schema::string().error("expected string")),
//!                 ),
//!         ),
//! );
//!
//! let error = validator
//!     .validate(&json!({"name": 12, "config": {"nested": {}}}))
//!     .unwrap_failure();
//!
//! assert_eq!(
//!     error.into_vec(),
//!     vec![
//!         ValidationConstraint::field("name", "expected string"),
//!         ValidationConstraint::nested(
//!             "config",
//!             vec![
//!                 ValidationConstraint::field("quantity", "expected number"),
//!                 ValidationConstraint::nested(
//!                     "nested",
//!                     vec![ValidationConstraint::field("time", "expected string")],
//!                 ),
//!             ],
//!         ),
//!     ]
//! );
//! ```

pub mod adapters;
pub mod class;
pub mod constraint;
pub mod error;
pub mod input;
pub mod issue;
pub mod normalize;
pub mod operator;
pub mod outcome;
pub mod path;
pub mod schema;
pub mod validator;

pub use constraint::{ValidationConstraint, ValidationError};
pub use error::{ApiError, ApiValidationError, ErrorCode, SchemaError, SchemaErrors};
pub use input::{Input, ValidatedInput};
pub use issue::{Issue, IssueKind};
pub use normalize::{normalize, DefaultMessages, MessageStrategy, Normalizer};
pub use operator::Operator;
pub use outcome::Outcome;
pub use path::{JsonPath, PathSegment};
pub use schema::{
    ArraySchema, DiscriminatedUnionSchema, EnumSchema, LiteralSchema, NumberSchema, ObjectSchema,
    OptionalSchema, Schema, SchemaLike, StringSchema, TupleSchema, UnionSchema, ValueValidator,
};
pub use validator::{Validator, ValidatorExt};

/// Result of running a schema from the schema engine directly.
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Outcome<String, ValidationError>>();
        assert_send_sync::<ValidationError>();
        assert_send_sync::<SchemaErrors>();
        assert_send_sync::<ApiValidationError>();
        assert_send_sync::<Normalizer>();
        assert_send_sync::<adapters::SchemaValidator<serde_json::Value>>();
        assert_send_sync::<adapters::ClassValidator<serde_json::Value>>();
        assert_send_sync::<class::ClassSchema>();
        assert_send_sync::<Input<serde_json::Value>>();
    }
}
