//! Fragment formatting for gamedata-watch.
//!
//! Turns grouped change records into an ordered sequence of self-contained,
//! unsplittable fragments ready for size-bounded packing and delivery.
//!
//! # Key Types
//!
//! - [`Fragment`] / [`FragmentKind`] -- One rendered change unit with its framing
//! - [`format_groups`] -- Structured change groups into fragments
//! - [`format_line_diff`] -- Text diffs into addition/deletion fragments

pub mod formatter;
pub mod fragment;

pub use formatter::{format_groups, format_line_diff};
pub use fragment::{Fragment, FragmentKind};
