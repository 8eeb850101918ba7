// src/dashboard/mod.rs
//! Read side: tables come in through a TTL cache, `views` shapes them.
//! Read failures turn into an empty table plus a message; they never propagate.

pub mod cache;
pub mod snapshot;
pub mod views;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::consts::{CACHE_TTL_SECS, DASHBOARD_ROW_LIMIT};
use crate::models::{MetricSample, Record, ScheduleEvent, SurveyResponse, VideoStat};
use crate::store::{Query, Store};

pub use cache::TtlCache;

/// Rows of one table, or why there are none.
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub error: Option<String>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), error: None }
    }
}

impl<T> Loaded<T> {
    /// Message for an empty table view.
    pub fn empty_message(&self, what: &str) -> Option<String> {
        match (&self.error, self.rows.is_empty()) {
            (Some(e), _) => Some(format!("Could not load {what}: {e}")),
            (None, true) => Some(format!("No {what} yet.")),
            (None, false) => None,
        }
    }
}

/// Everything the dashboard shows, loaded in one go.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub sns: Loaded<MetricSample>,
    pub videos: Loaded<VideoStat>,
    pub schedule: Loaded<ScheduleEvent>,
    pub surveys: Loaded<SurveyResponse>,
}

pub struct Dashboard {
    store: Arc<dyn Store>,
    cache: TtlCache<Vec<Value>>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_ttl(store, Duration::from_secs(CACHE_TTL_SECS))
    }

    pub fn with_ttl(store: Arc<dyn Store>, ttl: Duration) -> Self {
        Self { store, cache: TtlCache::new(ttl) }
    }

    /// Newest rows first (by `order_col`), capped at the dashboard row limit.
    /// Rows that don't fit `T` are dropped; the table fails only if none fit.
    pub fn table<T: Record>(&mut self, order_col: &str, now: Instant) -> Loaded<T> {
        let q = Query::new().order_desc(order_col).limit(DASHBOARD_ROW_LIMIT);
        let store = Arc::clone(&self.store);
        let raw = match self.cache.get_or_try_load(T::TABLE, now, || store.select(T::TABLE, &q)) {
            Ok(raw) => raw,
            Err(e) => {
                logw!("dashboard: {} unavailable: {e}", T::TABLE);
                return Loaded { rows: Vec::new(), error: Some(e.to_string()) };
            }
        };

        let total = raw.len();
        let mut last_err = None;
        let rows: Vec<T> = raw
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<T>(v) {
                Ok(row) => Some(row),
                Err(e) => {
                    logw!("dashboard: skipping unreadable {} row: {e}", T::TABLE);
                    last_err = Some(e);
                    None
                }
            })
            .collect();

        let error = match last_err {
            Some(e) if rows.is_empty() => Some(format!("{total} unreadable row(s): {e}")),
            Some(_) => {
                logw!("dashboard: {} of {total} {} row(s) skipped", total - rows.len(), T::TABLE);
                None
            }
            None => None,
        };
        Loaded { rows, error }
    }

    pub fn snapshot(&mut self, now: Instant) -> Snapshot {
        Snapshot {
            sns: self.table("created_at", now),
            videos: self.table("created_at", now),
            schedule: self.table("event_date", now),
            surveys: self.table("created_at", now),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Drop cached tables so the next read hits the store.
    pub fn refresh(&mut self) {
        self.cache.clear();
    }
}
