use serde_json::{json, Value};
use tracing::debug;

use gdw_format::FragmentKind;
use gdw_pack::Unit;

use crate::error::{DeliveryError, NotifyResult};
use crate::Notifier;

/// Delivers units as Discord-style webhook embeds.
///
/// Each unit becomes one `POST` with a single embed; diff-kinded bodies are
/// fenced in a ```` ```diff ```` block so the channel highlights the
/// `+`/`-` prefixes. Accepted statuses are 200 and 204.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> NotifyResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// The embed payload for one unit.
    fn embed(unit: &Unit) -> Value {
        let description = match unit.kind {
            FragmentKind::Informational => unit.body.clone(),
            _ => format!("```diff\n{}\n```", unit.body),
        };
        json!({
            "title": unit.title,
            "description": description,
            "color": unit.kind.color(),
        })
    }
}

impl Notifier for WebhookNotifier {
    fn deliver(&self, unit: &Unit) -> NotifyResult<()> {
        debug!(title = %unit.title, size = unit.size(), "delivering unit");
        let payload = json!({ "embeds": [Self::embed(unit)] });
        let response = self.client.post(&self.url).json(&payload).send()?;

        let status = response.status();
        if status.as_u16() != 200 && status.as_u16() != 204 {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }
}
