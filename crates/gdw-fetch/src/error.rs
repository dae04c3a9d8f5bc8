/// Errors from fetching a tracked resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The origin answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded as the resource's kind.
    #[error("cannot decode body from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
