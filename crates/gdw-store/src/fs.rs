use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use gdw_types::{Document, ResourceKind};

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotStore;

/// Filesystem-backed snapshot store: one file per tracked resource.
///
/// Saves stage the new content in a temporary file in the snapshot's
/// directory and rename it over the target, so a crash mid-write leaves the
/// previous snapshot intact and a truncated file is never visible to `load`.
pub struct FsSnapshotStore {
    path: PathBuf,
    kind: ResourceKind,
}

impl FsSnapshotStore {
    /// A store reading and writing `path`, decoding as `kind`.
    pub fn new(path: impl Into<PathBuf>, kind: ResourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self) -> StoreResult<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        let document =
            Document::from_bytes(self.kind, &bytes).map_err(|e| StoreError::CorruptSnapshot {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Some(document))
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| StoreError::InvalidPath(self.path.clone()))?;
        std::fs::create_dir_all(dir)?;

        // Stage in the target directory so the rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&document.to_bytes())?;
        staged.flush()?;
        staged.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}
