//! Foundation types for gamedata-watch.
//!
//! This crate provides the data model shared by every other crate in the
//! workspace: the tracked document, typed change paths, and resource kinds.
//!
//! # Key Types
//!
//! - [`Document`] -- A fetched resource: plain text or structured JSON
//! - [`Path`] / [`PathStep`] -- Typed address of a location inside a structured document
//! - [`ResourceKind`] -- How a resource's body is interpreted at fetch time

pub mod document;
pub mod path;

pub use document::{Document, ResourceKind};
pub use path::{Path, PathStep};
