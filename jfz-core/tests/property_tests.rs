//! Property-based tests for JFZ core primitives

use jfz_core::classify::classify_content;
use jfz_core::{analyze, sanitize, Limits, NodeKind, TreeBuilder, TreeNode};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy producing arbitrary JSON values of bounded depth and width
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 <>#*{}:=_.-]{0,40}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z0-9 _.-]{0,10}", inner), 0..6).prop_map(|members| {
                let mut map = Map::new();
                for (key, value) in members {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

/// Count tree file nodes and placeholder files separately
fn count_files(root: &TreeNode) -> (u64, u64) {
    let mut files = 0;
    let mut placeholders = 0;
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if node.kind == NodeKind::File {
            if node.name == "empty_object.json" || node.name == "empty_array.json" {
                placeholders += 1;
            } else {
                files += 1;
            }
        }
        pending.extend(node.children.iter());
    }
    (files, placeholders)
}

/// Count empty containers in a JSON value
fn count_empty_containers(value: &Value) -> u64 {
    let mut count = 0;
    let mut pending = vec![value];
    while let Some(current) = pending.pop() {
        match current {
            Value::Object(map) => {
                if map.is_empty() {
                    count += 1;
                }
                pending.extend(map.values());
            }
            Value::Array(items) => {
                if items.is_empty() {
                    count += 1;
                }
                pending.extend(items.iter());
            }
            _ => {}
        }
    }
    count
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in ".*") {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitize_output_is_filesystem_safe(raw in ".*") {
        let safe = sanitize(&raw);
        prop_assert!(safe.chars().count() <= 255);
        for ch in safe.chars() {
            prop_assert!(!"<>:\"/\\|?*".contains(ch));
            prop_assert!(!ch.is_control());
            prop_assert!(!ch.is_whitespace());
        }
        prop_assert!(!safe.starts_with('_'));
        prop_assert!(!safe.ends_with('_'));
        prop_assert!(!safe.contains("__"));
    }

    #[test]
    fn sanitize_handles_long_input(raw in "[\\PC _?]{255,400}") {
        let safe = sanitize(&raw);
        prop_assert!(safe.chars().count() <= 255);
        prop_assert_eq!(sanitize(&safe), safe);
    }

    #[test]
    fn classify_is_deterministic(content in ".*") {
        prop_assert_eq!(classify_content(&content), classify_content(&content));
    }

    #[test]
    fn classify_yields_known_extension(content in ".*") {
        let ext = classify_content(&content);
        prop_assert!(matches!(ext, ".json" | ".html" | ".css" | ".js" | ".md" | ".txt"));
    }

    #[test]
    fn build_terminates_and_leaf_counts_match(value in arb_json()) {
        let limits = Limits::default();
        let tree = TreeBuilder::new(&limits).build(&value, "root").unwrap();
        let stats = analyze(&value);
        let (files, placeholders) = count_files(&tree);
        prop_assert_eq!(files, stats.file_count);
        prop_assert_eq!(placeholders, count_empty_containers(&value));
    }
}
