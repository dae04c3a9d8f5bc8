//! Dispatch boundary for gamedata-watch.
//!
//! Delivers each packed unit as one independent request to the configured
//! notification channel. Delivery is at-most-once and best-effort: the
//! caller logs and skips a failed unit rather than retrying or aborting the
//! remaining units.

pub mod error;
pub mod webhook;

pub use error::{DeliveryError, NotifyResult};
pub use webhook::WebhookNotifier;

use tracing::info;

use gdw_pack::Unit;

/// Channel-side boundary: `deliver(Unit) -> Ok | DeliveryError`.
pub trait Notifier: Send + Sync {
    /// Deliver one unit to the channel.
    fn deliver(&self, unit: &Unit) -> NotifyResult<()>;
}

/// Notifier used when no channel is configured: logs and succeeds, so the
/// run still completes and the snapshot is still saved.
#[derive(Default)]
pub struct NullNotifier;

impl NullNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for NullNotifier {
    fn deliver(&self, unit: &Unit) -> NotifyResult<()> {
        info!(title = %unit.title, "no channel configured, skipping notification");
        Ok(())
    }
}
