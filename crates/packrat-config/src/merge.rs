//! Structural merge of configuration layers.
//!
//! Layers are merged as JSON values before they are resolved into a typed
//! [`BuildConfig`](crate::BuildConfig). The rules are:
//!
//! - objects merge key by key, recursively
//! - scalars (and mismatched kinds) are replaced by the override
//! - `null` in the override removes the key, so the default applies again
//! - arrays are concatenated base-then-override, skipping override elements
//!   already present (structural equality)
//!
//! The array policy keeps the merge idempotent:
//! `merge(merge(b, o), o) == merge(b, o)`. Individual paths can opt into
//! another strategy through [`MergeRules`].

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// How a value at a given key path is combined with its override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Arrays: base elements, then override elements not already present.
    Append,
    /// Arrays: override elements not already present, then base elements.
    Prepend,
    /// The override value replaces the base value wholesale.
    Replace,
    /// Arrays of objects: an override element replaces the base element whose
    /// `key` field holds the same value; unmatched elements are appended.
    ReplaceBy(String),
    /// Objects keyed by name: same-named entries are replaced wholesale
    /// instead of merged.
    ReplaceEntries,
}

/// Per-path merge strategies, keyed by dotted path (`optimization.minimizer`).
///
/// Paths only contain object keys; array indices never appear in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    rules: IndexMap<String, MergeStrategy>,
}

impl MergeRules {
    /// No overrides: every path uses the default strategy.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rules for the build record: named maps replace same-named entries.
    pub fn standard() -> Self {
        Self::empty()
            .with("entry", MergeStrategy::ReplaceEntries)
            .with("optimization.splitChunks.cacheGroups", MergeStrategy::ReplaceEntries)
    }

    pub fn with(mut self, path: impl Into<String>, strategy: MergeStrategy) -> Self {
        self.rules.insert(path.into(), strategy);
        self
    }

    pub fn strategy_for(&self, path: &str) -> Option<&MergeStrategy> {
        self.rules.get(path)
    }
}

/// Merge `overlay` into a copy of `base` and return the result.
pub fn merge_values(base: &Value, overlay: &Value, rules: &MergeRules) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay, rules, "");
    merged
}

/// Merge `overlay` into `target` in place.
pub fn merge_into(target: &mut Value, overlay: &Value, rules: &MergeRules, path: &str) {
    match (rules.strategy_for(path), overlay) {
        (Some(MergeStrategy::Replace), _) => *target = strip_nulls(overlay),
        (Some(MergeStrategy::ReplaceEntries), Value::Object(update)) => {
            let map = ensure_object(target);
            for (key, value) in update {
                if value.is_null() {
                    map.remove(key);
                } else {
                    map.insert(key.clone(), strip_nulls(value));
                }
            }
        }
        (_, Value::Object(update)) => {
            let map = ensure_object(target);
            for (key, value) in update {
                if value.is_null() {
                    map.remove(key);
                    continue;
                }
                let child = join_path(path, key);
                match map.get_mut(key) {
                    Some(slot) => merge_into(slot, value, rules, &child),
                    None => {
                        let mut slot = Value::Null;
                        merge_into(&mut slot, value, rules, &child);
                        map.insert(key.clone(), slot);
                    }
                }
            }
        }
        (strategy, Value::Array(update)) => {
            let base = match target.take() {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            *target = Value::Array(merge_arrays(base, update, strategy));
        }
        (_, scalar) => *target = scalar.clone(),
    }
}

fn merge_arrays(base: Vec<Value>, update: &[Value], strategy: Option<&MergeStrategy>) -> Vec<Value> {
    match strategy {
        Some(MergeStrategy::Prepend) => {
            let mut head: Vec<Value> = Vec::with_capacity(update.len() + base.len());
            for item in update {
                let item = strip_nulls(item);
                if !base.contains(&item) && !head.contains(&item) {
                    head.push(item);
                }
            }
            head.extend(base);
            head
        }
        Some(MergeStrategy::ReplaceBy(key)) => {
            let mut merged = base;
            for item in update {
                let item = strip_nulls(item);
                let position = item
                    .get(key)
                    .and_then(|id| merged.iter().position(|existing| existing.get(key) == Some(id)));
                match position {
                    Some(index) => merged[index] = item,
                    None if !merged.contains(&item) => merged.push(item),
                    None => {}
                }
            }
            merged
        }
        _ => {
            let mut merged = base;
            for item in update {
                let item = strip_nulls(item);
                if !merged.contains(&item) {
                    merged.push(item);
                }
            }
            merged
        }
    }
}

fn ensure_object(target: &mut Value) -> &mut Map<String, Value> {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    match target {
        Value::Object(map) => map,
        _ => unreachable!("target was just replaced with an object"),
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Copy of `value` with every `null` object member removed.
///
/// Array elements are kept as-is apart from nested objects.
pub fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(_) => strip_nulls(item),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
