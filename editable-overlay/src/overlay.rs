use editable_types::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Pending, uncommitted edits keyed by field path.
///
/// Paths are unique; a later `change` for the same path overwrites the
/// earlier one. Iteration follows `FieldPath` ordering, so folding the
/// overlay is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overlay {
    changes: BTreeMap<FieldPath, Value>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pending value, returning the one it replaced.
    pub fn change(&mut self, path: FieldPath, value: Value) -> Option<Value> {
        self.changes.insert(path, value)
    }

    /// Drops the pending value for `path`. Absent paths are a no-op.
    pub fn reset(&mut self, path: &FieldPath) -> Option<Value> {
        self.changes.remove(path)
    }

    /// Drops every pending value.
    pub fn reset_all(&mut self) {
        self.changes.clear();
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.changes.get(path)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.changes.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Changed paths, in fold order.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.changes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Value)> {
        self.changes.iter()
    }
}

impl FromIterator<(FieldPath, Value)> for Overlay {
    fn from_iter<I: IntoIterator<Item = (FieldPath, Value)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Overlay {
    type Item = (&'a FieldPath, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldPath, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
