//! Line-level diff: compare two flat text documents.
//!
//! Uses the `similar` crate (Myers diff algorithm) and keeps only the pure
//! added/removed lines. Text has no structural identity to key a
//! modification on, so a changed line surfaces as a removal plus an addition.

use similar::{ChangeTag, TextDiff};

/// The result of diffing two text documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineDiff {
    /// The changed lines, in diff order.
    pub changes: Vec<LineChange>,
}

impl LineDiff {
    /// Returns `true` if the two documents are identical.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed lines.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Lines present only in the new document, in order.
    pub fn added_lines(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                LineChange::Added(line) => Some(line.as_str()),
                LineChange::Removed(_) => None,
            })
            .collect()
    }

    /// Lines present only in the old document, in order.
    pub fn removed_lines(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                LineChange::Removed(line) => Some(line.as_str()),
                LineChange::Added(_) => None,
            })
            .collect()
    }
}

/// A single changed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineChange {
    /// A line present in the new document but not in the old.
    Added(String),
    /// A line present in the old document but not in the new.
    Removed(String),
}

/// Compute a line diff between two text documents.
///
/// Context lines and hunk headers are discarded; only additions and
/// removals are retained. Equal inputs short-circuit to an empty diff.
pub fn diff_lines(old: &str, new: &str) -> LineDiff {
    if old == new {
        return LineDiff::default();
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut changes = Vec::new();

    for change in text_diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n').to_string();
        match change.tag() {
            ChangeTag::Equal => {}
            ChangeTag::Delete => changes.push(LineChange::Removed(line)),
            ChangeTag::Insert => changes.push(LineChange::Added(line)),
        }
    }

    LineDiff { changes }
}
