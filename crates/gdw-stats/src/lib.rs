//! Per-item marketplace stats tracking for gamedata-watch.
//!
//! A separate collaborator from the change-detection pipeline: it extracts
//! the set of tracked item classnames from the furnidata document, fetches
//! per-item marketplace stats, and maintains a rolling history per item.
//! A rate-limited item is retried with bounded exponential backoff and then
//! skipped for the current run only.
//!
//! # Key Types
//!
//! - [`ItemRef`] / [`extract_items`] -- Tracked items from furnidata
//! - [`StatsClient`] / [`StatsFetch`] -- Per-item fetch boundary with a
//!   typed rate-limit outcome; the retry loop is owned by the caller
//! - [`merge_item_history`] -- Rolling history maintenance

pub mod client;
pub mod config;
pub mod history;
pub mod items;
pub mod tracker;

pub use client::{fetch_with_backoff, HttpStatsClient, StatsClient, StatsFetch};
pub use config::StatsConfig;
pub use history::{merge_item_history, update_day_offsets, HISTORY_LIMIT_DAYS};
pub use items::{extract_items, ItemKind, ItemRef};
pub use tracker::{update_all, UpdateReport};
