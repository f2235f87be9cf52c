//! [`Validator`](crate::Validator) implementations for the two built-in
//! engines.
//!
//! - [`SchemaValidator`] turns flat [`SchemaError`](crate::SchemaError)
//!   lists into [`Issue`](crate::Issue)s and normalizes them.
//! - [`ClassValidator`] maps the class engine's [`PropertyError`](crate::class::PropertyError)
//!   tree with a [`PropertyErrorMapper`].
//!
//! Both only ever report failures as [`ValidationError`](crate::ValidationError)s.

mod class_validator;
mod schema;

pub use class_validator::{ClassValidator, DefaultPropertyErrorMapper, PropertyErrorMapper};
pub use schema::SchemaValidator;
