use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::info;

use crate::client::{fetch_with_backoff, StatsClient};
use crate::config::StatsConfig;
use crate::history::merge_item_history;
use crate::items::ItemRef;

/// Summary of one stats update run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Items whose history was merged this run.
    pub updated: usize,
    /// Items skipped after a failure or exhausted rate-limit retries.
    pub skipped: usize,
}

/// Update the stored history for every tracked item.
///
/// A skipped item (rate-limited past the retry budget, or failed outright)
/// is dropped for this run only; the remaining items still proceed.
pub fn update_all(
    client: &dyn StatsClient,
    config: &StatsConfig,
    items: &[ItemRef],
    stats: &mut Map<String, Value>,
    today: NaiveDate,
) -> UpdateReport {
    let mut report = UpdateReport::default();

    for item in items {
        match fetch_with_backoff(client, item, config.max_retries, config.base_delay) {
            Some(api_result) => {
                merge_item_history(stats, &item.classname, &api_result, today);
                report.updated += 1;
            }
            None => report.skipped += 1,
        }
    }

    info!(
        updated = report.updated,
        skipped = report.skipped,
        "stats update complete"
    );
    report
}
