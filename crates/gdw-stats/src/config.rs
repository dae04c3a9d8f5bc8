use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the stats tracker.
///
/// URL templates contain a `{classname}` placeholder substituted per item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Source of the furnidata document the tracked items come from.
    pub furnidata_url: String,
    /// Stats endpoint template for room items.
    pub room_stats_url: String,
    /// Stats endpoint template for wall items.
    pub wall_stats_url: String,
    /// Where the per-classname history file is kept.
    pub output_path: PathBuf,
    /// Rate-limit retries before an item is skipped for the run.
    pub max_retries: u32,
    /// First backoff wait; doubles per retry.
    #[serde(with = "humantime_millis")]
    pub base_delay: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            furnidata_url: "https://www.habbo.it/gamedata/furnidata_json/0".into(),
            room_stats_url: "https://www.habbo.it/api/public/marketplace/stats/roomItem/{classname}"
                .into(),
            wall_stats_url: "https://www.habbo.it/api/public/marketplace/stats/wallitem/{classname}"
                .into(),
            output_path: PathBuf::from("historical_stats.json"),
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Serialize the backoff delay as plain milliseconds.
mod humantime_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
