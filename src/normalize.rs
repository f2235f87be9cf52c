//! Folding flat issue lists into nested constraint trees.
//!
//! [`Normalizer`] turns a sequence of [`Issue`]s, each addressed by a path
//! from the root, into a list of [`ValidationConstraint`]s where every shared
//! path prefix becomes exactly one nested node.
//!
//! # Example
//!
//! ```rust
//! use verdict::{normalize, Issue, JsonPath, ValidationConstraint};
//!
//! let config = JsonPath::root().push_field("config");
//! let issues = vec![
//!     Issue::new(JsonPath::root().push_field("name"), "expected string"),
//!     Issue::new(config.push_field("quantity"), "expected number"),
//!     Issue::new(config.push_field("nested").push_field("time"), "expected string"),
//! ];
//!
//! assert_eq!(
//!     normalize(&issues),
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

use crate::constraint::ValidationConstraint;
use crate::issue::{Issue, IssueKind};
use crate::path::PathSegment;

/// Derives the message that ends up in a constraint.
///
/// Any `Fn(&Issue) -> String + Send + Sync` closure is a strategy.
pub trait MessageStrategy: Send + Sync {
    /// Returns the message for `issue`.
    fn message(&self, issue: &Issue) -> String;
}

impl<F> MessageStrategy for F
where
    F: Fn(&Issue) -> String + Send + Sync,
{
    fn message(&self, issue: &Issue) -> String {
        self(issue)
    }
}

/// Uses the issue message verbatim, except for discriminator and enum
/// mismatches, which list the accepted values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageStrategy for DefaultMessages {
    fn message(&self, issue: &Issue) -> String {
        match &issue.kind {
            IssueKind::InvalidUnionDiscriminator { options } => {
                format!("Discriminator should be one of: {}", quoted(options))
            }
            IssueKind::InvalidEnumValue { options } => {
                format!("Should be one of the valid enum values: {}", quoted(options))
            }
            _ => issue.message.clone(),
        }
    }
}

fn quoted(options: &[String]) -> String {
    options
        .iter()
        .map(|option| format!("'{}'", option))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds constraint trees from issue lists.
///
/// The message strategy is pluggable; the tree-building walk is not.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<M = DefaultMessages> {
    messages: M,
}

impl Normalizer {
    /// Creates a normalizer with [`DefaultMessages`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: MessageStrategy> Normalizer<M> {
    /// Creates a normalizer with a custom message strategy.
    ///
    /// ```rust
    /// use verdict::{Issue, JsonPath, Normalizer};
    ///
    /// let shouting = Normalizer::with_messages(|issue: &Issue| issue.message.to_uppercase());
    /// let tree = shouting.normalize(&[Issue::new(JsonPath::root().push_field("a"), "bad")]);
    /// assert_eq!(tree[0].message(), Some("BAD"));
    /// ```
    pub fn with_messages(messages: M) -> Self {
        Self { messages }
    }

    /// Folds `issues` into a constraint tree, preserving their order.
    pub fn normalize<'a, I>(&self, issues: I) -> Vec<ValidationConstraint>
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut constraints = Vec::new();
        for issue in issues {
            let message = self.messages.message(issue);
            match issue.path.split_leaf() {
                None => constraints.push(ValidationConstraint::field("", message)),
                Some((chain, leaf)) => {
                    get_or_insert_nested(&mut constraints, chain)
                        .push(ValidationConstraint::field(leaf.to_key(), message));
                }
            }
        }
        constraints
    }
}

/// Normalizes with [`DefaultMessages`].
pub fn normalize<'a, I>(issues: I) -> Vec<ValidationConstraint>
where
    I: IntoIterator<Item = &'a Issue>,
{
    Normalizer::new().normalize(issues)
}

/// Walks `chain` from `constraints`, reusing nested nodes with a matching
/// field name and appending empty ones where none exists, and returns the
/// child list at the end of the chain.
fn get_or_insert_nested<'a>(
    constraints: &'a mut Vec<ValidationConstraint>,
    chain: &[PathSegment],
) -> &'a mut Vec<ValidationConstraint> {
    let mut current = constraints;
    for segment in chain {
        let key = segment.to_key();
        let index = match current.iter().position(|c| c.is_nested_named(&key)) {
            Some(index) => index,
            None => {
                current.push(ValidationConstraint::nested(key, Vec::new()));
                current.len() - 1
            }
        };
        current = match &mut current[index] {
            ValidationConstraint::Nested { constraints, .. } => constraints,
            ValidationConstraint::Field { .. } => unreachable!("index points at a nested node"),
        };
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;

    fn at(path: &[&str], message: &str) -> Issue {
        let path: JsonPath = path.iter().map(|s| PathSegment::field(*s)).collect();
        Issue::new(path, message)
    }

    #[test]
    fn test_root_issue_has_empty_field() {
        let tree = normalize(&[Issue::root("expected object")]);
        assert_eq!(tree, vec![ValidationConstraint::field("", "expected object")]);
    }

    #[test]
    fn test_single_segment_stays_flat() {
        let tree = normalize(&[at(&["name"], "a"), at(&["age"], "b")]);
        assert_eq!(
            tree,
            vec![
                ValidationConstraint::field("name", "a"),
                ValidationConstraint::field("age", "b"),
            ]
        );
    }

    #[test]
    fn test_shared_prefix_creates_one_node() {
        let tree = normalize(&[at(&["config", "a"], "1"), at(&["config", "b"], "2")]);
        assert_eq!(
            tree,
            vec![ValidationConstraint::nested(
                "config",
                vec![
                    ValidationConstraint::field("a", "1"),
                    ValidationConstraint::field("b", "2"),
                ],
            )]
        );
    }

    #[test]
    fn test_interleaved_prefixes_reuse_nodes() {
        let tree = normalize(&[
            at(&["a", "x"], "1"),
            at(&["b", "y"], "2"),
            at(&["a", "z"], "3"),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].constraints().map(|c| c.len()), Some(2));
        assert_eq!(tree[1].field_name(), "b");
    }

    #[test]
    fn test_leaf_with_same_name_does_not_capture_nesting() {
        let tree = normalize(&[at(&["config"], "required"), at(&["config", "a"], "bad")]);
        assert_eq!(
            tree,
            vec![
                ValidationConstraint::field("config", "required"),
                ValidationConstraint::nested("config", vec![ValidationConstraint::field("a", "bad")]),
            ]
        );
    }

    #[test]
    fn test_indices_become_keys() {
        let path = JsonPath::root().push_field("items").push_index(1).push_field("sku");
        let tree = normalize(&[Issue::new(path, "expected string")]);
        assert_eq!(
            tree,
            vec![ValidationConstraint::nested(
                "items",
                vec![ValidationConstraint::nested(
                    "1",
                    vec![ValidationConstraint::field("sku", "expected string")],
                )],
            )]
        );
    }

    #[test]
    fn test_discriminator_message() {
        let issue = at(&["kind"], "ignored").with_kind(IssueKind::InvalidUnionDiscriminator {
            options: vec!["cat".into(), "dog".into()],
        });
        assert_eq!(
            DefaultMessages.message(&issue),
            "Discriminator should be one of: 'cat', 'dog'"
        );
    }

    #[test]
    fn test_enum_message() {
        let issue = at(&["size"], "ignored").with_kind(IssueKind::InvalidEnumValue {
            options: vec!["S".into(), "M".into(), "L".into()],
        });
        assert_eq!(
            DefaultMessages.message(&issue),
            "Should be one of the valid enum values: 'S', 'M', 'L'"
        );
    }

    #[test]
    fn test_custom_strategy_keeps_structure() {
        let normalizer = Normalizer::with_messages(|issue: &Issue| format!("[{}]", issue.message));
        let tree = normalizer.normalize(&[at(&["a", "b"], "x")]);
        assert_eq!(
            tree,
            vec![ValidationConstraint::nested("a", vec![ValidationConstraint::field("b", "[x]")])]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&Vec::<Issue>::new()).is_empty());
    }
}
