// src/scrape/schedule.rs
use crate::{
    config::options::Pacing,
    core::net::Fetch,
    error::Result,
    ingest::{run_batch, BatchReport},
    progress::Progress,
    reconcile::{reconcile_records, Policy, WriteReport},
    specs::schedule::{self, ScheduleParser},
    store::Store,
};

/// Identity of a calendar row: an event is "already there" if date and title match.
pub const SCHEDULE_KEY: [&str; 2] = ["event_date", "title"];

/// Scrape one schedule page and insert the events not yet in `calendar_events`.
pub fn sync_schedule(
    url: &str,
    http: &dyn Fetch,
    store: &dyn Store,
    progress: &mut dyn Progress,
) -> Result<BatchReport> {
    let parser = ScheduleParser::new()?;
    let policy = Policy::insert_if_absent(&SCHEDULE_KEY);
    // one page: nothing follows a 429, so nothing to wait for
    let pacing = Pacing::none();

    progress.log(&format!("Syncing schedule from {url}…"));
    run_batch(&[url], |u| s!(*u), &pacing, progress, |u| {
        let events = schedule::fetch(http, &parser, u)?;
        for ev in &events {
            logd!("schedule: {} [{}] {}", ev.event_date, ev.category, ev.title);
        }
        let w: WriteReport = reconcile_records(store, &policy, &events)?;
        logf!("schedule: {} new, {} already present", w.inserted, w.already_present);
        Ok(w)
    })
}
