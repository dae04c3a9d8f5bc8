/// Errors from delivering a unit to the notification channel.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Network-level failure reaching the channel.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The channel rejected the delivery.
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result alias for delivery operations.
pub type NotifyResult<T> = Result<T, DeliveryError>;
