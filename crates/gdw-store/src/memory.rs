use std::sync::RwLock;

use gdw_types::Document;

use crate::error::StoreResult;
use crate::traits::SnapshotStore;

/// In-memory snapshot store for tests and embedding.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    snapshot: RwLock<Option<Document>>,
}

impl InMemorySnapshotStore {
    /// An empty store (first-run state).
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a snapshot.
    pub fn with_snapshot(document: Document) -> Self {
        Self {
            snapshot: RwLock::new(Some(document)),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> StoreResult<Option<Document>> {
        Ok(self.snapshot.read().expect("lock poisoned").clone())
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        *self.snapshot.write().expect("lock poisoned") = Some(document.clone());
        Ok(())
    }
}
