//! Snapshot persistence for gamedata-watch.
//!
//! The last successfully fetched document of each tracked resource is kept
//! as a snapshot and used as the diff baseline for the next run. Snapshot
//! state is an explicit store boundary passed to callers, never ambient
//! global state.
//!
//! # Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FsSnapshotStore`] -- one snapshot file per resource, written atomically
//! - [`InMemorySnapshotStore`] -- for tests and embedding
//!
//! # Design Rules
//!
//! 1. A partially written snapshot is never visible to `load` (write to a
//!    temporary file, then rename into place).
//! 2. A missing snapshot is `Ok(None)`, not an error: it marks the first run.
//! 3. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use traits::SnapshotStore;
