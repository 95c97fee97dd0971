//! Property-based tests for the merge engine.
//!
//! - Read-through: reads resolve overlay → base → default
//! - Reset is the inverse of change for a single path
//! - An empty overlay leaves any payload base untouched
//! - Completion never drops siblings that exist in the source container

use editable_overlay::merge::{build_payload, read};
use editable_overlay::{FieldPath, Overlay};
use editable_types::json::get_at;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn segment_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "addr", "city", "zip"]).prop_map(str::to_string)
}

fn path_strategy() -> impl Strategy<Value = FieldPath> {
    (
        prop::sample::select(vec!["attributes", "relationships"]),
        prop::collection::vec(segment_strategy(), 1..4),
    )
        .prop_map(|(root, rest)| {
            FieldPath::from_segments(std::iter::once(root.to_string()).chain(rest)).unwrap()
        })
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn document_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop::collection::btree_map(segment_strategy(), inner, 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>()))
    })
}

fn base_strategy() -> impl Strategy<Value = Value> {
    (document_strategy(), document_strategy())
        .prop_map(|(attributes, relationships)| {
            json!({"id": "1", "type": "t", "attributes": attributes, "relationships": relationships})
        })
}

fn overlay_strategy() -> impl Strategy<Value = Overlay> {
    prop::collection::vec((path_strategy(), leaf_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

// =============================================================================
// READ-THROUGH
// =============================================================================

proptest! {
    #[test]
    fn read_returns_overlay_value_when_present(
        base in base_strategy(),
        overlay in overlay_strategy(),
        default in leaf_strategy(),
    ) {
        for (path, pending) in overlay.iter() {
            prop_assert_eq!(&read(&overlay, Some(&base), path, default.clone()), pending);
        }
    }

    #[test]
    fn read_falls_through_when_absent(
        base in base_strategy(),
        path in path_strategy(),
        default in leaf_strategy(),
    ) {
        let overlay = Overlay::new();
        let expected = get_at(&base, path.segments()).cloned().unwrap_or(default.clone());
        prop_assert_eq!(read(&overlay, Some(&base), &path, default), expected);
    }

    #[test]
    fn reset_restores_previous_read(
        base in base_strategy(),
        overlay in overlay_strategy(),
        path in path_strategy(),
        value in leaf_strategy(),
        default in leaf_strategy(),
    ) {
        prop_assume!(!overlay.contains(&path));
        let before = read(&overlay, Some(&base), &path, default.clone());

        let mut edited = overlay.clone();
        edited.change(path.clone(), value);
        edited.reset(&path);

        prop_assert_eq!(read(&edited, Some(&base), &path, default), before);
        prop_assert_eq!(edited, overlay);
    }

    #[test]
    fn reset_all_restores_base_reads(
        base in base_strategy(),
        overlay in overlay_strategy(),
        path in path_strategy(),
        default in leaf_strategy(),
    ) {
        let mut cleared = overlay.clone();
        cleared.reset_all();
        let expected = get_at(&base, path.segments()).cloned().unwrap_or(default.clone());
        prop_assert_eq!(read(&cleared, Some(&base), &path, default), expected);
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

proptest! {
    #[test]
    fn empty_overlay_payload_is_identity(base in base_strategy(), complete in any::<bool>()) {
        let payload = build_payload(&Overlay::new(), base.clone(), Some(&base), complete);
        prop_assert_eq!(payload, base);
    }

    #[test]
    fn last_written_value_is_in_payload(
        base in base_strategy(),
        path in path_strategy(),
        value in leaf_strategy(),
        complete in any::<bool>(),
    ) {
        let mut overlay = Overlay::new();
        overlay.change(path.clone(), value.clone());
        let payload = build_payload(&overlay, json!({}), Some(&base), complete);
        prop_assert_eq!(get_at(&payload, path.segments()), Some(&value));
    }

    #[test]
    fn completion_keeps_source_siblings(
        city in "[a-z]{1,6}",
        zip in "[0-9]{1,5}",
        street in "[a-z]{1,6}",
        new_city in "[a-z]{1,6}",
    ) {
        let base = json!({"attributes": {"addr": {"city": city, "zip": zip, "street": street}}});
        let mut overlay = Overlay::new();
        overlay.change(FieldPath::parse("attributes.addr.city").unwrap(), json!(new_city));

        let payload = build_payload(&overlay, json!({}), Some(&base), true);
        prop_assert_eq!(
            payload,
            json!({"attributes": {"addr": {"city": new_city, "zip": zip, "street": street}}})
        );
    }
}
