//! Property-based tests for the layer merge.
//!
//! Covers the merge invariants over arbitrary JSON layers: override values
//! win, untouched keys survive, and merging the same override twice changes
//! nothing.

use packrat_config::{BuildConfig, ConfigLayer, MergeRules, merge_values};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Top-level layers are always objects.
fn layer_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-f]", value_strategy(), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

/// Every value in `overlay` is visible in `merged` at the same path.
fn assert_override_wins(merged: &Value, overlay: &Value) -> Result<(), TestCaseError> {
    let (Some(merged), Some(overlay)) = (merged.as_object(), overlay.as_object()) else {
        return Err(TestCaseError::fail("expected objects"));
    };
    for (key, value) in overlay {
        match value {
            Value::Null => prop_assert!(!merged.contains_key(key), "`{key}` should be removed"),
            Value::Object(_) => {
                let slot = merged.get(key).ok_or_else(|| TestCaseError::fail(format!("`{key}` missing")))?;
                assert_override_wins(slot, value)?;
            }
            Value::Array(items) => {
                let slot = merged
                    .get(key)
                    .and_then(Value::as_array)
                    .ok_or_else(|| TestCaseError::fail(format!("`{key}` is not an array")))?;
                for item in items {
                    prop_assert!(slot.contains(item), "`{key}` lost override element {item}");
                }
            }
            scalar => prop_assert_eq!(merged.get(key), Some(scalar)),
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: fields set by the override hold the override's value
    #[test]
    fn prop_override_wins(base in layer_strategy(), overlay in layer_strategy()) {
        let merged = merge_values(&base, &overlay, &MergeRules::empty());
        assert_override_wins(&merged, &overlay)?;
    }

    /// Property: fields absent from the override keep the base value
    #[test]
    fn prop_absent_fields_preserved(base in layer_strategy(), overlay in layer_strategy()) {
        let merged = merge_values(&base, &overlay, &MergeRules::empty());
        let base = base.as_object().unwrap();
        let overlay = overlay.as_object().unwrap();
        for (key, value) in base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    /// Property: merge(merge(B, O), O) == merge(B, O)
    #[test]
    fn prop_merge_is_idempotent(base in layer_strategy(), overlay in layer_strategy()) {
        for rules in [MergeRules::empty(), MergeRules::standard()] {
            let once = merge_values(&base, &overlay, &rules);
            let twice = merge_values(&once, &overlay, &rules);
            prop_assert_eq!(once, twice);
        }
    }

    /// Property: base array elements keep their order ahead of appended ones
    #[test]
    fn prop_arrays_keep_base_prefix(
        base in prop::collection::vec(0i64..20, 0..6),
        overlay in prop::collection::vec(0i64..20, 0..6),
    ) {
        let merged = merge_values(&json!({"list": base}), &json!({"list": overlay}), &MergeRules::empty());
        let merged: Vec<i64> = serde_json::from_value(merged["list"].clone()).unwrap();
        prop_assert_eq!(&merged[..base.len()], &base[..]);
    }

    /// Property: performance budgets pass through overrides that omit them
    #[test]
    fn prop_budgets_pass_through(
        asset in 1u64..10_000_000,
        entrypoint in 1u64..10_000_000,
        parallelism in 1u32..64,
    ) {
        let base = BuildConfig::from_value(json!({
            "mode": "development",
            "performance": {"maxAssetSize": asset, "maxEntrypointSize": entrypoint}
        })).unwrap();
        let overlay = ConfigLayer::new("test", json!({
            "mode": "production",
            "parallelism": parallelism
        })).unwrap();

        let merged = base.merge(&overlay).unwrap();
        prop_assert_eq!(merged.performance.max_asset_size, asset);
        prop_assert_eq!(merged.performance.max_entrypoint_size, entrypoint);
        prop_assert_eq!(merged.parallelism, parallelism);
    }
}
