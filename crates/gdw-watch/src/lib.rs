//! Run orchestration for gamedata-watch.
//!
//! One invocation runs each configured resource to completion: fetch the
//! current document, compare it with the stored snapshot, render and pack
//! the changes, deliver each unit, and persist the new snapshot. The run is
//! single-threaded and synchronous; suspension only happens at the fetch
//! and dispatch boundaries.
//!
//! # Error policy
//!
//! - Fetch failure aborts the resource's run; the snapshot is untouched.
//! - Store failure is fatal and aborts before any dispatch.
//! - Delivery failure of one unit is logged and does not block the
//!   remaining units or the snapshot save.

pub mod config;
pub mod error;
pub mod run;

pub use config::{ResourceConfig, WatchConfig, DEFAULT_MESSAGE_LIMIT};
pub use error::{WatchError, WatchResult};
pub use run::{run_resource, RunOutcome};
