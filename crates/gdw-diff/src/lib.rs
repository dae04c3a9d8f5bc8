//! Diff engine for gamedata-watch.
//!
//! Computes the change set between two versions of a tracked resource,
//! producing structured records ready for rendering and delivery.
//!
//! # Key Types
//!
//! - [`LineDiff`] / [`LineChange`] -- Line-level diff of flat text documents
//! - [`StructuralDiff`] / [`Change`] -- Recursive diff of nested JSON documents
//! - [`ChangeGroup`] / [`FieldChange`] -- Changes grouped per enclosing object

pub mod group;
pub mod line_diff;
pub mod structural_diff;

pub use group::{group_changes, ChangeGroup, FieldChange};
pub use line_diff::{diff_lines, LineChange, LineDiff};
pub use structural_diff::{diff_structured, Change, StructuralDiff};
