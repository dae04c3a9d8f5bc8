use chrono::Utc;
use tracing::{info, warn};

use gdw_diff::{diff_lines, diff_structured, group_changes};
use gdw_fetch::Fetcher;
use gdw_format::{format_groups, format_line_diff, Fragment};
use gdw_notify::Notifier;
use gdw_pack::{Packer, Unit};
use gdw_store::SnapshotStore;
use gdw_types::{Document, ResourceKind};

use crate::config::ResourceConfig;
use crate::error::WatchResult;

/// How one resource's run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No prior snapshot existed; it was initialized and announced.
    Initialized,
    /// Old and new documents compare equal.
    ///
    /// `notified` is `true` for structured resources, which announce the
    /// no-op; text resources stay silent.
    Unchanged { notified: bool },
    /// Changes were detected, rendered, and dispatched.
    Changed {
        units: usize,
        delivered: usize,
        failed: usize,
    },
}

/// Run one tracked resource to completion: fetch, compare, render, pack,
/// dispatch, persist.
pub fn run_resource(
    config: &ResourceConfig,
    fetcher: &dyn Fetcher,
    store: &dyn SnapshotStore,
    notifier: &dyn Notifier,
) -> WatchResult<RunOutcome> {
    let new = fetcher.fetch(&config.url, config.kind)?;

    let Some(old) = store.load()? else {
        return initialize(config, &new, store, notifier);
    };

    if old == new {
        info!(resource = %config.name, "no changes");
        // Structured resources announce the no-op; text resources stay
        // silent. Preserved per resource kind.
        let notified = config.kind == ResourceKind::Json;
        if notified {
            let fragment = Fragment::informational(
                format!("{} check", config.name),
                format!("No changes detected as of {}.", Utc::now().to_rfc3339()),
            );
            deliver(notifier, &Unit::informational(&fragment), &config.name);
        }
        return Ok(RunOutcome::Unchanged { notified });
    }

    let fragments = match (&old, &new) {
        (Document::Text(old_text), Document::Text(new_text)) => {
            format_line_diff(&config.name, &diff_lines(old_text, new_text))
        }
        (Document::Structured(old_value), Document::Structured(new_value)) => {
            let groups = group_changes(&diff_structured(old_value, new_value));
            format_groups(&config.name, &groups, old_value, new_value)
        }
        _ => {
            // The stored snapshot's kind no longer matches the configured
            // kind. Reinitialize rather than diffing across kinds.
            warn!(resource = %config.name, "snapshot kind changed, reinitializing");
            return initialize(config, &new, store, notifier);
        }
    };

    let units = Packer::new(config.message_limit).pack(&fragments);
    let mut delivered = 0;
    let mut failed = 0;
    for unit in &units {
        if deliver(notifier, unit, &config.name) {
            delivered += 1;
        } else {
            failed += 1;
        }
    }

    store.save(&new)?;
    info!(
        resource = %config.name,
        units = units.len(),
        delivered,
        failed,
        "changes dispatched"
    );
    Ok(RunOutcome::Changed {
        units: units.len(),
        delivered,
        failed,
    })
}

/// First run (or kind change): save the snapshot and announce it. No diff
/// is computed.
fn initialize(
    config: &ResourceConfig,
    new: &Document,
    store: &dyn SnapshotStore,
    notifier: &dyn Notifier,
) -> WatchResult<RunOutcome> {
    store.save(new)?;
    let fragment = Fragment::informational(
        format!("Initial {} snapshot", config.name),
        format!(
            "Initial {} snapshot saved on {}.",
            config.name,
            Utc::now().to_rfc3339()
        ),
    );
    deliver(notifier, &Unit::informational(&fragment), &config.name);
    info!(resource = %config.name, "snapshot initialized");
    Ok(RunOutcome::Initialized)
}

/// Deliver one unit, logging instead of propagating failure. Each unit is
/// an independent request; one failure never blocks the next unit.
fn deliver(notifier: &dyn Notifier, unit: &Unit, resource: &str) -> bool {
    match notifier.deliver(unit) {
        Ok(()) => true,
        Err(e) => {
            warn!(resource, title = %unit.title, error = %e, "unit delivery failed, continuing");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use gdw_fetch::{FetchError, FetchResult};
    use gdw_notify::{DeliveryError, NotifyResult};
    use gdw_store::InMemorySnapshotStore;
    use gdw_types::{Document, ResourceKind};
    use serde_json::json;

    struct FixedFetcher(Document);

    impl Fetcher for FixedFetcher {
        fn fetch(&self, _url: &str, _kind: ResourceKind) -> FetchResult<Document> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        fn fetch(&self, url: &str, _kind: ResourceKind) -> FetchResult<Document> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    /// Records delivered units; optionally fails the first `fail_first`.
    #[derive(Default)]
    struct RecordingNotifier {
        delivered: Mutex<Vec<Unit>>,
        fail_first: usize,
    }

    impl RecordingNotifier {
        fn failing_first(count: usize) -> Self {
            Self {
                fail_first: count,
                ..Default::default()
            }
        }

        fn units(&self) -> Vec<Unit> {
            self.delivered.lock().unwrap().clone()
        }

        fn count(&self) -> usize {
            self.delivered.lock().unwrap().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn deliver(&self, unit: &Unit) -> NotifyResult<()> {
            let mut delivered = self.delivered.lock().unwrap();
            if delivered.len() < self.fail_first {
                delivered.push(unit.clone());
                return Err(DeliveryError::Rejected {
                    status: 400,
                    body: "bad".into(),
                });
            }
            delivered.push(unit.clone());
            Ok(())
        }
    }

    fn text_config() -> ResourceConfig {
        ResourceConfig {
            name: "external variables".into(),
            url: "https://example.org/vars".into(),
            kind: ResourceKind::Text,
            webhook: None,
            snapshot_path: "unused".into(),
            message_limit: 1900,
        }
    }

    fn json_config() -> ResourceConfig {
        ResourceConfig {
            name: "furnidata".into(),
            url: "https://example.org/furnidata".into(),
            kind: ResourceKind::Json,
            webhook: None,
            snapshot_path: "unused".into(),
            message_limit: 1900,
        }
    }

    #[test]
    fn first_run_initializes_and_announces() {
        let store = InMemorySnapshotStore::new();
        let notifier = RecordingNotifier::default();
        let fetcher = FixedFetcher(Document::Text("a\nb".into()));

        let outcome = run_resource(&text_config(), &fetcher, &store, &notifier).unwrap();

        assert_eq!(outcome, RunOutcome::Initialized);
        assert_eq!(store.load().unwrap(), Some(Document::Text("a\nb".into())));
        let units = notifier.units();
        assert_eq!(units.len(), 1);
        assert!(units[0].body.starts_with("Initial external variables snapshot saved"));
    }

    #[test]
    fn unchanged_text_resource_emits_nothing() {
        let doc = Document::Text("a\nb\nc".into());
        let store = InMemorySnapshotStore::with_snapshot(doc.clone());
        let notifier = RecordingNotifier::default();

        let outcome =
            run_resource(&text_config(), &FixedFetcher(doc), &store, &notifier).unwrap();

        assert_eq!(outcome, RunOutcome::Unchanged { notified: false });
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn unchanged_structured_resource_announces_no_op() {
        let doc = Document::Structured(json!({"a": 1}));
        let store = InMemorySnapshotStore::with_snapshot(doc.clone());
        let notifier = RecordingNotifier::default();

        let outcome =
            run_resource(&json_config(), &FixedFetcher(doc), &store, &notifier).unwrap();

        assert_eq!(outcome, RunOutcome::Unchanged { notified: true });
        assert_eq!(notifier.count(), 1);
        assert!(notifier.units()[0].body.starts_with("No changes detected"));
    }

    #[test]
    fn changed_text_resource_dispatches_and_saves() {
        let store = InMemorySnapshotStore::with_snapshot(Document::Text("a\nb\nc".into()));
        let notifier = RecordingNotifier::default();
        let fetcher = FixedFetcher(Document::Text("a\nb\nd".into()));

        let outcome = run_resource(&text_config(), &fetcher, &store, &notifier).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Changed { units: 1, delivered: 1, failed: 0 }
        );
        assert_eq!(store.load().unwrap(), Some(Document::Text("a\nb\nd".into())));
        // Additions fragment then deletions fragment, packed together.
        assert_eq!(notifier.units()[0].body, "+d\n-c");
    }

    #[test]
    fn changed_structured_resource_reports_modification() {
        let old = Document::Structured(json!({"items": {"x": {"name": "Chair", "price": 10}}}));
        let new = Document::Structured(json!({"items": {"x": {"name": "Chair", "price": 12}}}));
        let store = InMemorySnapshotStore::with_snapshot(old);
        let notifier = RecordingNotifier::default();

        let outcome =
            run_resource(&json_config(), &FixedFetcher(new.clone()), &store, &notifier).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Changed { units: 1, delivered: 1, failed: 0 }
        );
        let body = &notifier.units()[0].body;
        assert!(body.contains("- \"price\": 10,"));
        assert!(body.contains("+ \"price\": 12,"));
        assert_eq!(store.load().unwrap(), Some(new));
    }

    #[test]
    fn fetch_failure_aborts_without_touching_snapshot() {
        let old = Document::Text("original".into());
        let store = InMemorySnapshotStore::with_snapshot(old.clone());
        let notifier = RecordingNotifier::default();

        let err = run_resource(&text_config(), &FailingFetcher, &store, &notifier).unwrap_err();

        assert!(matches!(err, crate::WatchError::Fetch(_)));
        assert_eq!(store.load().unwrap(), Some(old));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn one_failed_delivery_does_not_block_the_rest() {
        // Limit sized so each fragment lands in its own unit.
        let config = ResourceConfig {
            message_limit: 5,
            ..text_config()
        };
        let store = InMemorySnapshotStore::with_snapshot(Document::Text("a\nb".into()));
        let notifier = RecordingNotifier::failing_first(1);
        let fetcher = FixedFetcher(Document::Text("x\ny".into()));

        let outcome = run_resource(&config, &fetcher, &store, &notifier).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Changed { units: 2, delivered: 1, failed: 1 }
        );
        // Snapshot still saved after the partial failure.
        assert_eq!(store.load().unwrap(), Some(Document::Text("x\ny".into())));
    }

    #[test]
    fn kind_change_reinitializes() {
        let store = InMemorySnapshotStore::with_snapshot(Document::Text("old".into()));
        let notifier = RecordingNotifier::default();
        let fetcher = FixedFetcher(Document::Structured(json!({"a": 1})));

        let outcome = run_resource(&json_config(), &fetcher, &store, &notifier).unwrap();

        assert_eq!(outcome, RunOutcome::Initialized);
        assert_eq!(
            store.load().unwrap(),
            Some(Document::Structured(json!({"a": 1})))
        );
    }
}
