//! Replay a scripted drag scenario against the in-memory host.
//!
//! Usage:
//!   dragsort-replay scenario.json
//!   dragsort-replay scenario.json --json
//!   RUST_LOG=dragsort=debug dragsort-replay scenario.json --timings

use anyhow::{Context, Result};
use clap::Parser;
use dragsort::replay::{self, Notification, Scenario};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

/// Replay a drag scenario and print the resulting container orders.
#[derive(Parser, Debug)]
#[command(name = "dragsort-replay")]
#[command(about = "Replay a scripted drag-sort scenario")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print move handling timings
    #[arg(long)]
    timings: bool,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenario = Scenario::load(&args.scenario)?;
    let report = replay::run(&scenario)
        .with_context(|| format!("Replay of {} failed", args.scenario.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for notification in &report.notifications {
            match notification {
                Notification::DragStart { item, from_index } => {
                    println!("dragStart {item} from {from_index:?}");
                }
                Notification::DragEnd {
                    item,
                    to_container,
                    to_index,
                    moved,
                } => {
                    println!("dragEnd   {item} to {to_container:?} at {to_index:?} (moved: {moved})");
                }
            }
        }
        for order in &report.orders {
            println!("{}: {}", order.label, order.items.join(", "));
        }
    }

    if args.timings {
        let stats = &report.move_timings;
        eprintln!(
            "moves: {}  avg {:.3}ms  p95 {:.3}ms  max {:.3}ms",
            stats.count(),
            stats.average(),
            stats.p95(),
            stats.max_ms()
        );
    }
    Ok(())
}
