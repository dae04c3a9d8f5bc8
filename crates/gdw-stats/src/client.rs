use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::StatsConfig;
use crate::items::{ItemKind, ItemRef};

/// Outcome of one per-item stats request.
///
/// Rate limiting is a first-class outcome rather than an error so the
/// bounded retry loop stays with the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatsFetch {
    /// The item's stats document.
    Ok(Value),
    /// The origin signalled a rate limit; the caller may back off and retry.
    RateLimited,
    /// Unrecoverable for this run (network error, bad status, bad body).
    Failed(String),
}

/// Per-item stats fetch boundary.
pub trait StatsClient: Send + Sync {
    fn fetch_item(&self, item: &ItemRef) -> StatsFetch;
}

/// Fetch an item's stats, retrying a rate-limited response with doubling
/// waits up to `max_retries` times, then skipping the item for this run.
///
/// Returns `None` when the item is skipped; the skip is logged, never silent.
pub fn fetch_with_backoff(
    client: &dyn StatsClient,
    item: &ItemRef,
    max_retries: u32,
    base_delay: Duration,
) -> Option<Value> {
    let mut attempt = 0;
    loop {
        match client.fetch_item(item) {
            StatsFetch::Ok(value) => return Some(value),
            StatsFetch::Failed(reason) => {
                warn!(classname = %item.classname, %reason, "stats fetch failed, skipping item");
                return None;
            }
            StatsFetch::RateLimited => {
                if attempt >= max_retries {
                    warn!(
                        classname = %item.classname,
                        attempts = attempt + 1,
                        "still rate limited, skipping item for this run"
                    );
                    return None;
                }
                let wait = base_delay * 2u32.pow(attempt);
                debug!(classname = %item.classname, ?wait, "rate limited, backing off");
                std::thread::sleep(wait);
                attempt += 1;
            }
        }
    }
}

/// Blocking HTTP stats client.
pub struct HttpStatsClient {
    client: reqwest::blocking::Client,
    room_template: String,
    wall_template: String,
}

impl HttpStatsClient {
    pub fn new(config: &StatsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            room_template: config.room_stats_url.clone(),
            wall_template: config.wall_stats_url.clone(),
        })
    }

    fn url_for(&self, item: &ItemRef) -> String {
        let template = match item.kind {
            ItemKind::Room => &self.room_template,
            ItemKind::Wall => &self.wall_template,
        };
        template.replace("{classname}", &item.classname)
    }
}

impl StatsClient for HttpStatsClient {
    fn fetch_item(&self, item: &ItemRef) -> StatsFetch {
        let url = self.url_for(item);
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(e) => return StatsFetch::Failed(e.to_string()),
        };

        let status = response.status();
        if status.as_u16() == 429 {
            return StatsFetch::RateLimited;
        }
        if !status.is_success() {
            return StatsFetch::Failed(format!("status {status} from {url}"));
        }

        match response.json() {
            Ok(value) => StatsFetch::Ok(value),
            Err(e) => StatsFetch::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// A scripted client that plays back a fixed sequence of outcomes.
    struct ScriptedClient {
        script: Mutex<Vec<StatsFetch>>,
        calls: Mutex<u32>,
    }

    impl ScriptedClient {
        fn new(script: Vec<StatsFetch>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    impl StatsClient for ScriptedClient {
        fn fetch_item(&self, _item: &ItemRef) -> StatsFetch {
            *self.calls.lock().unwrap() += 1;
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                StatsFetch::Failed("script exhausted".into())
            } else {
                script.remove(0)
            }
        }
    }

    fn item() -> ItemRef {
        ItemRef {
            classname: "chair".into(),
            kind: ItemKind::Room,
        }
    }

    const FAST: Duration = Duration::from_millis(1);

    #[test]
    fn success_returns_immediately() {
        let client = ScriptedClient::new(vec![StatsFetch::Ok(json!({"history": []}))]);
        let result = fetch_with_backoff(&client, &item(), 3, FAST);
        assert_eq!(result, Some(json!({"history": []})));
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn rate_limit_retries_then_succeeds() {
        let client = ScriptedClient::new(vec![
            StatsFetch::RateLimited,
            StatsFetch::RateLimited,
            StatsFetch::Ok(json!(1)),
        ]);
        let result = fetch_with_backoff(&client, &item(), 3, FAST);
        assert_eq!(result, Some(json!(1)));
        assert_eq!(client.calls(), 3);
    }

    #[test]
    fn rate_limit_exhausts_retries_and_skips() {
        let client = ScriptedClient::new(vec![StatsFetch::RateLimited; 10]);
        let result = fetch_with_backoff(&client, &item(), 3, FAST);
        assert_eq!(result, None);
        // Initial attempt plus three retries.
        assert_eq!(client.calls(), 4);
    }

    #[test]
    fn hard_failure_does_not_retry() {
        let client = ScriptedClient::new(vec![StatsFetch::Failed("boom".into())]);
        assert_eq!(fetch_with_backoff(&client, &item(), 3, FAST), None);
        assert_eq!(client.calls(), 1);
    }

    #[test]
    fn url_templates_substitute_classname() {
        let http = HttpStatsClient::new(&StatsConfig::default()).unwrap();
        let room = http.url_for(&item());
        assert!(room.ends_with("/roomItem/chair"));
        let wall = http.url_for(&ItemRef {
            classname: "poster".into(),
            kind: ItemKind::Wall,
        });
        assert!(wall.ends_with("/wallitem/poster"));
    }
}
