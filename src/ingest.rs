// src/ingest.rs
//
// Sequential batch driver: one source at a time, failures stay local to their source.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::options::Pacing;
use crate::error::{Error, Result};
use crate::progress::Progress;
use crate::reconcile::WriteReport;

/// Outcome of one batch, for logs and the CLI summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    /// Sources where no extractor matched
    pub skipped: usize,
    /// Of `failed`, how many were HTTP 429
    pub rate_limited: usize,
    pub writes: WriteReport,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.rate_limited += other.rate_limited;
        self.writes.add(other.writes);
    }
}

/// Run `each` over `items` in order, pausing `pacing.social_pause()` between sources.
///
/// - `Ok` counts as succeeded and its write counts are summed.
/// - `Error::NoMatch` is a skip (warning).
/// - `Error::RateLimited` is a failure followed by the rate-limit pause.
/// - `Error::Config` aborts the batch; every other error only fails its source.
pub fn run_batch<T, L, F>(
    items: &[T],
    label: L,
    pacing: &Pacing,
    progress: &mut dyn Progress,
    mut each: F,
) -> Result<BatchReport>
where
    L: Fn(&T) -> String,
    F: FnMut(&T) -> Result<WriteReport>,
{
    let mut report = BatchReport::default();
    progress.begin(items.len());

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            pause(pacing.social_pause());
        }
        let name = label(item);

        match each(item) {
            Ok(w) => {
                report.succeeded += 1;
                report.writes.add(w);
                logf!("{name}: ok (+{} row(s))", w.inserted);
                progress.item_done(&name);
            }
            Err(Error::NoMatch(what)) => {
                report.skipped += 1;
                logw!("{name}: nothing matched in {what}, skipped");
                progress.item_failed(&name, "no match");
            }
            Err(e @ Error::RateLimited { .. }) => {
                report.failed += 1;
                report.rate_limited += 1;
                logw!("{name}: {e}; pausing {}s", pacing.rate_limit_pause_secs);
                progress.item_failed(&name, "rate limited");
                pause(pacing.rate_limit_pause());
            }
            Err(e) if !e.is_source_local() => {
                progress.finish();
                return Err(e);
            }
            Err(e) => {
                report.failed += 1;
                loge!("{name}: {e}");
                progress.item_failed(&name, &e.to_string());
            }
        }
    }

    progress.finish();
    logf!(
        "Batch done: {} ok, {} failed, {} skipped; {} inserted, {} deleted, {} already present",
        report.succeeded, report.failed, report.skipped,
        report.writes.inserted, report.writes.deleted, report.writes.already_present
    );
    Ok(report)
}

/// Capture timestamps for one batch. Never goes backwards, even if the wall clock does.
#[derive(Debug, Default)]
pub struct CaptureClock {
    last: Option<DateTime<Utc>>,
}

impl CaptureClock {
    pub fn now(&mut self) -> DateTime<Utc> {
        let t = self.stamp(Utc::now());
        self.last = Some(t);
        t
    }

    fn stamp(&self, wall: DateTime<Utc>) -> DateTime<Utc> {
        match self.last {
            Some(prev) if prev > wall => prev,
            _ => wall,
        }
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
