use gdw_types::Document;

use crate::error::StoreResult;

/// Persistent home of one tracked resource's last-known snapshot.
///
/// All implementations must satisfy these invariants:
/// - `load` returns `Ok(None)` when no snapshot has ever been saved.
/// - `save` replaces the snapshot atomically enough that a partially
///   written snapshot is never treated as valid by a subsequent `load`.
/// - All I/O errors are propagated, never silently ignored.
pub trait SnapshotStore: Send + Sync {
    /// Read the last-known snapshot, or `None` on the first run.
    fn load(&self) -> StoreResult<Option<Document>>;

    /// Replace the snapshot with `document`.
    fn save(&self, document: &Document) -> StoreResult<()>;
}
