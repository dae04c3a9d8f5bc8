use std::path::PathBuf;

use gdw_fetch::FetchError;
use gdw_store::StoreError;

/// Errors that abort a resource's run.
///
/// Delivery errors are deliberately absent: they are logged per unit and
/// never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The origin could not be fetched; the snapshot stays untouched.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The snapshot store failed; fatal before any dispatch.
    #[error("snapshot store failed: {0}")]
    Store(#[from] StoreError),

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("cannot parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A resource named on the command line does not exist in the config.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

/// Result alias for watch operations.
pub type WatchResult<T> = Result<T, WatchError>;
