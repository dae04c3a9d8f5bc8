//! Structural diff: recursive comparison of nested JSON documents.
//!
//! Mappings are compared by key set, with scalar value changes reported as
//! modifications keyed on the enclosing object. Sequences are compared
//! order-insensitively: elements are matched by deep equality regardless of
//! position, and an element that changed shape is reported as a removal of
//! the old element plus an addition of the new one.

use serde_json::Value;

use gdw_types::document::is_scalar;
use gdw_types::Path;

/// The result of comparing two structured documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuralDiff {
    /// The change records, in new-document walk order.
    pub changes: Vec<Change>,
}

impl StructuralDiff {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of change records.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of `Added` records.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Added { .. }))
            .count()
    }

    /// Number of `Removed` records.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Removed { .. }))
            .count()
    }

    /// Number of `Modified` records.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Modified { .. }))
            .count()
    }
}

/// A single change between two structured documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// A value present in the new document, absent in the old.
    Added { path: Path, value: Value },
    /// A value present in the old document, absent in the new.
    Removed { path: Path, value: Value },
    /// A scalar leaf changed under a common parent object.
    Modified {
        /// Path of the enclosing object.
        parent: Path,
        /// The key within the enclosing object.
        field: String,
        old: Value,
        new: Value,
    },
}

/// Compute the structural diff between two documents.
pub fn diff_structured(old: &Value, new: &Value) -> StructuralDiff {
    let mut changes = Vec::new();
    walk(&Path::root(), old, new, &mut changes);
    StructuralDiff { changes }
}

fn walk(path: &Path, old: &Value, new: &Value, changes: &mut Vec<Change>) {
    if old == new {
        return;
    }

    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            // New-document key order first, removed keys appended after.
            for (key, new_val) in new_map {
                match old_map.get(key) {
                    Some(old_val) => {
                        diff_common_key(path, key, old_val, new_val, changes);
                    }
                    None => changes.push(Change::Added {
                        path: path.child(key.as_str()),
                        value: new_val.clone(),
                    }),
                }
            }
            for (key, old_val) in old_map {
                if !new_map.contains_key(key) {
                    changes.push(Change::Removed {
                        path: path.child(key.as_str()),
                        value: old_val.clone(),
                    });
                }
            }
        }
        (Value::Array(old_seq), Value::Array(new_seq)) => {
            diff_sequences(path, old_seq, new_seq, changes);
        }
        _ => {
            // Unequal scalars or a shape change at this position. Only the
            // document root reaches here: key-level shape changes are handled
            // in diff_common_key, and sequence elements are matched whole.
            changes.push(Change::Removed {
                path: path.clone(),
                value: old.clone(),
            });
            changes.push(Change::Added {
                path: path.clone(),
                value: new.clone(),
            });
        }
    }
}

/// Compare the values under a key present in both objects.
fn diff_common_key(
    parent: &Path,
    key: &str,
    old_val: &Value,
    new_val: &Value,
    changes: &mut Vec<Change>,
) {
    if old_val == new_val {
        return;
    }

    match (old_val, new_val) {
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)) => {
            walk(&parent.child(key), old_val, new_val, changes);
        }
        _ if is_scalar(old_val) && is_scalar(new_val) => {
            changes.push(Change::Modified {
                parent: parent.clone(),
                field: key.to_string(),
                old: old_val.clone(),
                new: new_val.clone(),
            });
        }
        _ => {
            // Shape change (scalar vs composite, or object vs array):
            // reported as a paired removal and addition.
            changes.push(Change::Removed {
                path: parent.child(key),
                value: old_val.clone(),
            });
            changes.push(Change::Added {
                path: parent.child(key),
                value: new_val.clone(),
            });
        }
    }
}

/// Order-insensitive sequence comparison.
///
/// Each new element is matched against a not-yet-matched deep-equal old
/// element. Unmatched new elements are additions at their new index;
/// unmatched old elements are removals at their old index.
fn diff_sequences(path: &Path, old_seq: &[Value], new_seq: &[Value], changes: &mut Vec<Change>) {
    let mut matched = vec![false; old_seq.len()];

    for (new_index, new_val) in new_seq.iter().enumerate() {
        let found = old_seq
            .iter()
            .enumerate()
            .find(|(old_index, old_val)| !matched[*old_index] && *old_val == new_val);
        match found {
            Some((old_index, _)) => matched[old_index] = true,
            None => changes.push(Change::Added {
                path: path.child(new_index),
                value: new_val.clone(),
            }),
        }
    }

    for (old_index, old_val) in old_seq.iter().enumerate() {
        if !matched[old_index] {
            changes.push(Change::Removed {
                path: path.child(old_index),
                value: old_val.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_documents_empty_diff() {
        let doc = json!({"items": {"x": {"name": "Chair", "price": 10}}, "list": [1, 2]});
        assert!(diff_structured(&doc, &doc).is_empty());
    }

    #[test]
    fn scalar_leaf_change_is_modified_on_parent() {
        let old = json!({"items": {"x": {"name": "Chair", "price": 10}}});
        let new = json!({"items": {"x": {"name": "Chair", "price": 12}}});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.len(), 1);
        match &diff.changes[0] {
            Change::Modified { parent, field, old, new } => {
                assert_eq!(*parent, Path::root().child("items").child("x"));
                assert_eq!(field, "price");
                assert_eq!(*old, json!(10));
                assert_eq!(*new, json!(12));
            }
            other => panic!("expected Modified, got {:?}", other),
        }
    }

    #[test]
    fn added_key_reports_whole_value() {
        let old = json!({"items": {}});
        let new = json!({"items": {"x": {"name": "Chair"}}});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.additions(), 1);
        match &diff.changes[0] {
            Change::Added { path, value } => {
                assert_eq!(*path, Path::root().child("items").child("x"));
                assert_eq!(*value, json!({"name": "Chair"}));
            }
            other => panic!("expected Added, got {:?}", other),
        }
    }

    #[test]
    fn removed_key_reports_whole_value() {
        let old = json!({"a": 1, "b": 2});
        let new = json!({"a": 1});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.removals(), 1);
        assert!(matches!(
            &diff.changes[0],
            Change::Removed { path, value } if *path == Path::root().child("b") && *value == json!(2)
        ));
    }

    #[test]
    fn sequences_are_order_insensitive() {
        let old = json!({"a": [1, 2]});
        let new = json!({"a": [2, 1]});
        assert!(diff_structured(&old, &new).is_empty());
    }

    #[test]
    fn sequence_element_change_is_paired_remove_add() {
        let old = json!({"a": [{"id": 1, "v": "x"}]});
        let new = json!({"a": [{"id": 1, "v": "y"}]});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
        assert_eq!(diff.modifications(), 0);
    }

    #[test]
    fn sequence_duplicates_use_multiset_matching() {
        let old = json!([1, 1, 2]);
        let new = json!([1, 2, 2]);

        let diff = diff_structured(&old, &new);
        // One surplus 1 removed, one surplus 2 added.
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
    }

    #[test]
    fn shape_change_under_key_is_paired_remove_add() {
        let old = json!({"v": 1});
        let new = json!({"v": {"nested": true}});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
        assert_eq!(diff.modifications(), 0);
    }

    #[test]
    fn root_scalar_change_is_paired_remove_add() {
        let diff = diff_structured(&json!(1), &json!(2));
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.removals(), 1);
        assert!(diff
            .changes
            .iter()
            .all(|c| matches!(c, Change::Added { path, .. } | Change::Removed { path, .. } if path.is_root())));
    }

    #[test]
    fn diff_is_a_structural_inverse() {
        let old = json!({"keep": 1, "modify": "a", "remove": [1, 2]});
        let new = json!({"keep": 1, "modify": "b", "added": {"x": true}});

        let forward = diff_structured(&old, &new);
        let backward = diff_structured(&new, &old);

        for change in &forward.changes {
            let inverse = match change {
                Change::Added { path, value } => Change::Removed {
                    path: path.clone(),
                    value: value.clone(),
                },
                Change::Removed { path, value } => Change::Added {
                    path: path.clone(),
                    value: value.clone(),
                },
                Change::Modified { parent, field, old, new } => Change::Modified {
                    parent: parent.clone(),
                    field: field.clone(),
                    old: new.clone(),
                    new: old.clone(),
                },
            };
            assert!(
                backward.changes.contains(&inverse),
                "missing inverse of {:?}",
                change
            );
        }
        assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn sibling_modifications_share_parent() {
        let old = json!({"obj": {"a": 1, "b": 2, "c": 3}});
        let new = json!({"obj": {"a": 9, "b": 8, "c": 3}});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.modifications(), 2);
        let parents: Vec<_> = diff
            .changes
            .iter()
            .filter_map(|c| match c {
                Change::Modified { parent, .. } => Some(parent.clone()),
                _ => None,
            })
            .collect();
        assert!(parents.iter().all(|p| *p == Path::root().child("obj")));
    }

    #[test]
    fn nested_recursion_builds_deep_paths() {
        let old = json!({"a": {"b": {"c": {"d": 1}}}});
        let new = json!({"a": {"b": {"c": {"d": 2}}}});

        let diff = diff_structured(&old, &new);
        assert_eq!(diff.len(), 1);
        match &diff.changes[0] {
            Change::Modified { parent, field, .. } => {
                assert_eq!(*parent, Path::root().child("a").child("b").child("c"));
                assert_eq!(field, "d");
            }
            other => panic!("expected Modified, got {:?}", other),
        }
    }
}
