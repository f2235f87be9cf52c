//! Property tests for folding issue lists into constraint trees.

use std::collections::BTreeSet;

use proptest::prelude::*;
use verdict::{
    normalize, DefaultMessages, Issue, IssueKind, JsonPath, MessageStrategy, Normalizer,
    PathSegment, ValidationConstraint,
};

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        3 => prop::sample::select(vec!["a", "b", "config", "items"])
            .prop_map(|name| PathSegment::field(name)),
        1 => (0usize..3).prop_map(PathSegment::index),
    ]
}

fn issue(max_depth: usize) -> impl Strategy<Value = Issue> {
    (prop::collection::vec(segment(), 1..=max_depth), "[a-z ]{1,12}")
        .prop_map(|(segments, message)| Issue::new(JsonPath::from_segments(segments), message))
}

fn leaf_count(constraints: &[ValidationConstraint]) -> usize {
    constraints
        .iter()
        .map(|c| match c.constraints() {
            Some(children) => leaf_count(children),
            None => 1,
        })
        .sum()
}

fn nested_names_are_unique(constraints: &[ValidationConstraint]) -> bool {
    let mut seen = BTreeSet::new();
    constraints.iter().filter(|c| c.is_nested()).all(|c| {
        seen.insert(c.field_name().to_string())
            && nested_names_are_unique(c.constraints().unwrap_or(&[]))
    })
}

proptest! {
    #[test]
    fn prop_single_segment_paths_stay_flat(issues in prop::collection::vec(issue(1), 0..20)) {
        let tree = normalize(&issues);

        prop_assert_eq!(tree.len(), issues.len());
        for (constraint, issue) in tree.iter().zip(&issues) {
            prop_assert!(!constraint.is_nested());
            prop_assert_eq!(constraint.message(), Some(issue.message.as_str()));
            prop_assert_eq!(constraint.field_name(), issue.path.segments()[0].to_key());
        }
    }

    #[test]
    fn prop_every_issue_becomes_one_leaf(issues in prop::collection::vec(issue(4), 0..30)) {
        prop_assert_eq!(leaf_count(&normalize(&issues)), issues.len());
    }

    #[test]
    fn prop_shared_prefix_is_one_node(issues in prop::collection::vec(issue(4), 0..30)) {
        let tree = normalize(&issues);
        prop_assert!(nested_names_are_unique(&tree));

        let prefixes: BTreeSet<String> = issues
            .iter()
            .filter(|issue| issue.path.len() > 1)
            .map(|issue| issue.path.segments()[0].to_key())
            .collect();
        let nested = tree.iter().filter(|c| c.is_nested()).count();
        prop_assert_eq!(nested, prefixes.len());
    }

    #[test]
    fn prop_normalizing_is_deterministic(issues in prop::collection::vec(issue(3), 0..20)) {
        prop_assert_eq!(normalize(&issues), normalize(&issues));
    }
}

#[test]
fn test_index_segments_become_string_keys() {
    let items = JsonPath::root().push_field("items");
    let tree = normalize(&[
        Issue::new(items.push_index(0).push_field("sku"), "expected sku"),
        Issue::new(items.push_index(0).push_field("qty"), "expected qty"),
    ]);

    assert_eq!(
        tree,
        vec![ValidationConstraint::nested(
            "items",
            vec![ValidationConstraint::nested(
                "0",
                vec![
                    ValidationConstraint::field("sku", "expected sku"),
                    ValidationConstraint::field("qty", "expected qty"),
                ]
            )]
        )]
    );
}

#[test]
fn test_default_messages_render_options() {
    let issue = Issue::new(JsonPath::root().push_field("kind"), "Invalid discriminator value")
        .with_kind(IssueKind::InvalidUnionDiscriminator {
            options: vec!["cat".into(), "dog".into()],
        });
    assert_eq!(
        DefaultMessages.message(&issue),
        "Discriminator should be one of: 'cat', 'dog'"
    );

    let plain = Issue::new(JsonPath::root().push_field("name"), "expected string");
    assert_eq!(DefaultMessages.message(&plain), "expected string");
}

#[test]
fn test_custom_strategy_sees_kind() {
    let normalizer = Normalizer::with_messages(|issue: &Issue| match issue.kind {
        IssueKind::Required => format!("{} is required", issue.path),
        _ => issue.message.clone(),
    });

    let tree = normalizer.normalize(&[
        Issue::new(JsonPath::root().push_field("name"), "missing").with_kind(IssueKind::Required),
        Issue::new(JsonPath::root().push_field("age"), "expected number"),
    ]);

    assert_eq!(tree[0].message(), Some("name is required"));
    assert_eq!(tree[1].message(), Some("expected number"));
}
