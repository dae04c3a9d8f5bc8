//! Renders change groups into fragments.
//!
//! The rendering is a textual diff listing with nested-structure punctuation
//! (braces), not re-parseable JSON. Modified objects show every key of the
//! enclosing object in new-document order: changed keys as a paired
//! removed/added line, unchanged keys as neutral context.

use serde_json::{Map, Value};

use gdw_diff::{ChangeGroup, FieldChange, LineDiff};
use gdw_types::Path;

use crate::fragment::{Fragment, FragmentKind};

/// Render structured change groups into fragments, one fragment per group.
///
/// Output order follows the group order: additions first, then
/// modifications, then removals. `old` and `new` are consulted to resolve
/// the enclosing object of each modification group; a side whose ancestor
/// no longer exists degrades to an empty object.
pub fn format_groups(
    resource: &str,
    groups: &[ChangeGroup],
    old: &Value,
    new: &Value,
) -> Vec<Fragment> {
    groups
        .iter()
        .map(|group| match group {
            ChangeGroup::Added { value, .. } => Fragment::new(
                format!("{resource} new object"),
                FragmentKind::Addition,
                render_whole(value, '+'),
            ),
            ChangeGroup::Removed { value, .. } => Fragment::new(
                format!("{resource} removed object"),
                FragmentKind::Deletion,
                render_whole(value, '-'),
            ),
            ChangeGroup::Modified { parent, fields } => Fragment::new(
                format!("{resource} modifications"),
                FragmentKind::Modification,
                render_modified(parent, fields, old, new),
            ),
        })
        .collect()
}

/// Render a text diff into at most two fragments: one for all added lines,
/// one for all removed lines.
pub fn format_line_diff(resource: &str, diff: &LineDiff) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    let added = diff.added_lines();
    if !added.is_empty() {
        let body: Vec<String> = added.iter().map(|line| format!("+{line}")).collect();
        fragments.push(Fragment::new(
            format!("{resource} additions"),
            FragmentKind::Addition,
            body.join("\n"),
        ));
    }

    let removed = diff.removed_lines();
    if !removed.is_empty() {
        let body: Vec<String> = removed.iter().map(|line| format!("-{line}")).collect();
        fragments.push(Fragment::new(
            format!("{resource} deletions"),
            FragmentKind::Deletion,
            body.join("\n"),
        ));
    }

    fragments
}

/// Render a whole added or removed value, every line carrying the prefix.
fn render_whole(value: &Value, prefix: char) -> String {
    match value {
        Value::Object(map) => {
            let mut lines = vec!["{".to_string()];
            for (key, val) in map {
                lines.push(format!("{prefix} {}: {},", encode(&Value::String(key.clone())), encode(val)));
            }
            lines.push("}".to_string());
            lines.join("\n")
        }
        other => format!("{prefix} {}", encode(other)),
    }
}

/// Render a modified object: all keys in new-document order (old-only keys
/// appended), changed keys as paired removed/added lines, the rest as
/// two-space-indented context.
fn render_modified(parent: &Path, fields: &[FieldChange], old: &Value, new: &Value) -> String {
    let empty = Map::new();
    let old_obj = resolve_object(parent, old).unwrap_or(&empty);
    let new_obj = resolve_object(parent, new).unwrap_or(&empty);

    let mut keys: Vec<&String> = new_obj.keys().collect();
    for key in old_obj.keys() {
        if !new_obj.contains_key(key) {
            keys.push(key);
        }
    }

    let mut lines = vec!["{".to_string()];
    for key in keys {
        let key_json = encode(&Value::String(key.clone()));
        match fields.iter().find(|f| f.key == *key) {
            Some(change) => {
                lines.push(format!("- {}: {},", key_json, encode(&change.old)));
                lines.push(format!("+ {}: {},", key_json, encode(&change.new)));
            }
            None => {
                let val = new_obj.get(key).or_else(|| old_obj.get(key));
                if let Some(val) = val {
                    lines.push(format!("  {}: {},", key_json, encode(val)));
                }
            }
        }
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn resolve_object<'a>(path: &Path, document: &'a Value) -> Option<&'a Map<String, Value>> {
    path.resolve(document)?.as_object()
}

fn encode(value: &Value) -> String {
    // Serializing an in-memory Value cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}
