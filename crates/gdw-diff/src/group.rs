//! Change grouping: bucket raw change records by their enclosing object.
//!
//! Sibling `Modified` records under one parent collapse into a single group
//! so that one parent object yields one rendering unit. Added and removed
//! records stay standalone. Groups are ordered additions first, then
//! modifications, then removals, each in new-document walk order.

use serde_json::Value;

use gdw_types::Path;

use crate::structural_diff::{Change, StructuralDiff};

/// One coherent change unit, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeGroup {
    /// A whole value added at `path`.
    Added { path: Path, value: Value },
    /// A whole value removed at `path`.
    Removed { path: Path, value: Value },
    /// One or more scalar fields changed under the object at `parent`.
    Modified {
        parent: Path,
        fields: Vec<FieldChange>,
    },
}

/// A single changed field within a modified object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// Group a diff's change records into rendering units.
pub fn group_changes(diff: &StructuralDiff) -> Vec<ChangeGroup> {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    // First-seen parent order, which is new-document walk order.
    let mut modified: Vec<(Path, Vec<FieldChange>)> = Vec::new();

    for change in &diff.changes {
        match change {
            Change::Added { path, value } => added.push(ChangeGroup::Added {
                path: path.clone(),
                value: value.clone(),
            }),
            Change::Removed { path, value } => removed.push(ChangeGroup::Removed {
                path: path.clone(),
                value: value.clone(),
            }),
            Change::Modified { parent, field, old, new } => {
                let field_change = FieldChange {
                    key: field.clone(),
                    old: old.clone(),
                    new: new.clone(),
                };
                match modified.iter_mut().find(|(p, _)| p == parent) {
                    Some((_, fields)) => fields.push(field_change),
                    None => modified.push((parent.clone(), vec![field_change])),
                }
            }
        }
    }

    let mut groups = added;
    groups.extend(
        modified
            .into_iter()
            .map(|(parent, fields)| ChangeGroup::Modified { parent, fields }),
    );
    groups.extend(removed);
    groups
}
