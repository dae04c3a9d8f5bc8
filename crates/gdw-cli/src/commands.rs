use std::fs;

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use serde_json::Value;

use gdw_diff::{diff_lines, diff_structured, group_changes};
use gdw_fetch::{Fetcher, HttpFetcher};
use gdw_format::{format_groups, format_line_diff, Fragment, FragmentKind};
use gdw_notify::{Notifier, NullNotifier, WebhookNotifier};
use gdw_stats::{extract_items, update_all, HttpStatsClient, StatsConfig};
use gdw_store::{FsSnapshotStore, SnapshotStore};
use gdw_types::{Document, ResourceKind};
use gdw_watch::{run_resource, RunOutcome, WatchConfig, WatchError};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Diff(args) => cmd_diff(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = WatchConfig::from_path(&args.config)?;

    let selected: Vec<_> = match &args.resource {
        Some(name) => {
            let resource = config
                .resource(name)
                .ok_or_else(|| WatchError::UnknownResource(name.clone()))?;
            vec![resource]
        }
        None => config.resources.iter().collect(),
    };
    if selected.is_empty() {
        println!("No resources configured.");
        return Ok(());
    }

    let fetcher = HttpFetcher::new()?;
    let mut failures = 0;
    for resource in selected {
        let store = FsSnapshotStore::new(&resource.snapshot_path, resource.kind);
        let notifier: Box<dyn Notifier> = match &resource.webhook {
            Some(url) => Box::new(WebhookNotifier::new(url.clone())?),
            None => Box::new(NullNotifier::new()),
        };

        match run_resource(resource, &fetcher, &store, notifier.as_ref()) {
            Ok(RunOutcome::Initialized) => {
                println!("{} {}: snapshot initialized", "✓".green(), resource.name.bold());
            }
            Ok(RunOutcome::Unchanged { .. }) => {
                println!("{} {}: no changes", "✓".green(), resource.name.bold());
            }
            Ok(RunOutcome::Changed { units, delivered, failed }) => {
                let status = if failed == 0 { "✓".green() } else { "✗".red() };
                println!(
                    "{} {}: {} units, {} delivered, {} failed",
                    status,
                    resource.name.bold(),
                    units,
                    delivered,
                    failed
                );
                if failed > 0 {
                    failures += 1;
                }
            }
            Err(e) => {
                println!("{} {}: {}", "✗".red(), resource.name.bold(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} resource(s) did not complete cleanly");
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let mut config = StatsConfig::default();
    if let Some(url) = args.furnidata_url {
        config.furnidata_url = url;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let fetcher = HttpFetcher::new()?;
    let document = fetcher.fetch(&config.furnidata_url, ResourceKind::Json)?;
    let Document::Structured(furnidata) = document else {
        anyhow::bail!("furnidata endpoint did not return a structured document");
    };
    let items = extract_items(&furnidata);
    println!("Tracking {} items", items.len().to_string().bold());

    let store = FsSnapshotStore::new(&config.output_path, ResourceKind::Json);
    let mut stats = match store.load()? {
        Some(Document::Structured(Value::Object(map))) => map,
        Some(_) => anyhow::bail!(
            "history file {} is not a JSON object",
            config.output_path.display()
        ),
        None => serde_json::Map::new(),
    };

    let client = HttpStatsClient::new(&config)?;
    let report = update_all(
        &client,
        &config,
        &items,
        &mut stats,
        Local::now().date_naive(),
    );
    store.save(&Document::Structured(Value::Object(stats)))?;

    println!(
        "{} Stats updated: {} items, {} skipped",
        "✓".green().bold(),
        report.updated,
        report.skipped
    );
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let kind = match args.kind {
        KindArg::Text => ResourceKind::Text,
        KindArg::Json => ResourceKind::Json,
    };
    let old = read_document(kind, &args.old)?;
    let new = read_document(kind, &args.new)?;

    if old == new {
        println!("No changes.");
        return Ok(());
    }

    let fragments = match (&old, &new) {
        (Document::Text(old_text), Document::Text(new_text)) => {
            format_line_diff("diff", &diff_lines(old_text, new_text))
        }
        (Document::Structured(old_value), Document::Structured(new_value)) => {
            let groups = group_changes(&diff_structured(old_value, new_value));
            format_groups("diff", &groups, old_value, new_value)
        }
        // Both files are parsed with the same kind.
        _ => unreachable!(),
    };

    for fragment in &fragments {
        print_fragment(fragment);
    }
    Ok(())
}

fn read_document(kind: ResourceKind, path: &std::path::Path) -> anyhow::Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    Document::from_bytes(kind, &bytes).with_context(|| format!("cannot parse {}", path.display()))
}

fn print_fragment(fragment: &Fragment) {
    let title = match fragment.kind {
        FragmentKind::Addition => fragment.title.green().bold(),
        FragmentKind::Deletion => fragment.title.red().bold(),
        FragmentKind::Modification => fragment.title.yellow().bold(),
        FragmentKind::Informational => fragment.title.blue().bold(),
    };
    println!("{title}");
    println!("{}", fragment.body);
}
