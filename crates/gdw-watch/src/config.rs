use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gdw_types::ResourceKind;

use crate::error::{WatchError, WatchResult};

/// Default per-message size budget, leaving fence and framing headroom under
/// the channel's 2048-character embed cap.
pub const DEFAULT_MESSAGE_LIMIT: usize = 1900;

/// Top-level configuration: the set of tracked resources.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceConfig>,
}

impl WatchConfig {
    /// Load the configuration from a TOML file.
    pub fn from_path(path: &Path) -> WatchResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WatchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| WatchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The resource with the given name, if configured.
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// One tracked remote resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Display name, used in fragment titles and log lines.
    pub name: String,
    /// Origin URL.
    pub url: String,
    /// How the body is parsed and diffed.
    pub kind: ResourceKind,
    /// Notification channel. Absent means deliveries are logged no-ops.
    #[serde(default)]
    pub webhook: Option<String>,
    /// Where the last-known snapshot lives.
    pub snapshot_path: PathBuf,
    /// Per-unit size budget in bytes.
    #[serde(default = "default_message_limit")]
    pub message_limit: usize,
}

fn default_message_limit() -> usize {
    DEFAULT_MESSAGE_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let cfg: WatchConfig = toml::from_str(
            r#"
            [[resource]]
            name = "external variables"
            url = "https://example.org/gamedata/external_variables/0"
            kind = "text"
            snapshot_path = "snapshots/external_variables.txt"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.resources.len(), 1);
        let resource = &cfg.resources[0];
        assert_eq!(resource.kind, ResourceKind::Text);
        assert_eq!(resource.message_limit, DEFAULT_MESSAGE_LIMIT);
        assert!(resource.webhook.is_none());
    }

    #[test]
    fn parse_full_config() {
        let cfg: WatchConfig = toml::from_str(
            r#"
            [[resource]]
            name = "furnidata"
            url = "https://example.org/gamedata/furnidata_json/0"
            kind = "json"
            webhook = "https://discord.example/api/webhooks/1/abc"
            snapshot_path = "snapshots/furnidata.json"
            message_limit = 1000

            [[resource]]
            name = "flash texts"
            url = "https://example.org/gamedata/external_flash_texts/0"
            kind = "text"
            snapshot_path = "snapshots/flash_texts.txt"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.resources.len(), 2);
        assert_eq!(cfg.resources[0].message_limit, 1000);
        assert!(cfg.resource("furnidata").is_some());
        assert!(cfg.resource("missing").is_none());
    }

    #[test]
    fn empty_config_has_no_resources() {
        let cfg: WatchConfig = toml::from_str("").unwrap();
        assert!(cfg.resources.is_empty());
    }
}
