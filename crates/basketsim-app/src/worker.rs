// Periodic sweep that simulates every scheduled match whose date has passed.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::context::LeagueContext;

/// Outcome counts for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub due: usize,
    pub played: usize,
    pub failed: usize,
}

/// Simulate every due match in id order.
///
/// A failing match is logged and counted, and the sweep moves on. Nothing
/// already recorded is rolled back.
pub fn sweep_once(ctx: &LeagueContext, now: DateTime<Utc>) -> SweepReport {
    let due = match ctx.store().due_matches(now) {
        Ok(due) => due,
        Err(e) => {
            warn!("sweep could not load due matches: {e:#}");
            return SweepReport {
                failed: 1,
                ..SweepReport::default()
            };
        }
    };

    let mut report = SweepReport {
        due: due.len(),
        ..SweepReport::default()
    };
    for game in due {
        match ctx.simulate_match(game.id, now) {
            Ok(_) => report.played += 1,
            Err(e) => {
                warn!("sweep failed to simulate match {}: {}", game.id, e);
                report.failed += 1;
            }
        }
    }

    if report.due > 0 {
        info!(
            "sweep finished: {} due, {} played, {} failed",
            report.due, report.played, report.failed
        );
    } else {
        debug!("sweep found no due matches");
    }
    report
}

/// Run a sweep now and then once per `interval` until `shutdown` turns true
/// or its sender is dropped.
pub async fn run(ctx: Arc<LeagueContext>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    info!("match sweep started (every {:?})", interval);
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            // The first tick completes immediately, giving the startup sweep.
            _ = ticker.tick() => {
                sweep_once(&ctx, Utc::now());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("match sweep stopping");
                    break;
                }
            }
        }
    }
}
