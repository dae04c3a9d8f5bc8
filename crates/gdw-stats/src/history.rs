//! Rolling history maintenance for tracked items.
//!
//! Each classname maps to an array of daily stat records. Records carry a
//! `statsDate` (ISO date) and a `dayOffset` recomputed every run relative
//! to today, clamped to the history window.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use tracing::warn;

/// Records older than this many days keep a clamped offset of `-30`.
pub const HISTORY_LIMIT_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Recompute every record's `dayOffset` as `-min(days_since, 30)`.
///
/// Records whose `statsDate` is missing or unparseable are left unchanged.
pub fn update_day_offsets(history: &mut [Value], today: NaiveDate) {
    for record in history.iter_mut() {
        let Some(date) = record
            .get("statsDate")
            .and_then(|d| d.as_str())
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
        else {
            warn!("history record without a parseable statsDate, leaving offset as is");
            continue;
        };
        let delta = (today - date).num_days();
        let offset = -delta.min(HISTORY_LIMIT_DAYS);
        record["dayOffset"] = json!(offset.to_string());
    }
}

/// Fold one item's freshly fetched stats into the stored history map.
///
/// First sighting: the API's full history is adopted, stamping records that
/// lack a `statsDate` with the API's own stats date (today as a last
/// resort). Later runs: the API record with `dayOffset == "-1"` (falling
/// back to the last record) is appended once per calendar day. Offsets are
/// recomputed either way.
pub fn merge_item_history(
    stats: &mut Map<String, Value>,
    classname: &str,
    api_result: &Value,
    today: NaiveDate,
) {
    let today_str = today.format(DATE_FORMAT).to_string();
    let api_history = api_result
        .get("history")
        .and_then(|h| h.as_array())
        .cloned()
        .unwrap_or_default();

    match stats.get_mut(classname) {
        None => {
            let api_date = api_result
                .get("statsDate")
                .and_then(|d| d.as_str())
                .unwrap_or(&today_str)
                .to_string();
            let mut history = api_history;
            for record in &mut history {
                let Some(obj) = record.as_object_mut() else {
                    warn!(classname, "non-object history record, leaving it as is");
                    continue;
                };
                if !obj.contains_key("statsDate") {
                    obj.insert("statsDate".to_string(), json!(api_date));
                }
            }
            update_day_offsets(&mut history, today);
            stats.insert(classname.to_string(), Value::Array(history));
        }
        Some(stored) => {
            let Some(list) = stored.as_array_mut() else {
                warn!(classname, "stored history is not an array, skipping merge");
                return;
            };

            let new_entry = api_history
                .iter()
                .find(|r| r.get("dayOffset").and_then(|o| o.as_str()) == Some("-1"))
                .or(api_history.last())
                .cloned();

            if let Some(mut entry) = new_entry {
                let Some(obj) = entry.as_object_mut() else {
                    warn!(classname, "non-object stats entry, skipping append");
                    update_day_offsets(list, today);
                    return;
                };
                obj.insert("statsDate".to_string(), json!(today_str));
                let last_date = list
                    .last()
                    .and_then(|r| r.get("statsDate"))
                    .and_then(|d| d.as_str())
                    .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
                // At most one appended record per calendar day.
                if last_date.map_or(true, |d| d < today) {
                    list.push(entry);
                }
            }
            update_day_offsets(list, today);
        }
    }
}
