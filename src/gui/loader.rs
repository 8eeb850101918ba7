// src/gui/loader.rs
//
// Loads the dashboard snapshot off the UI thread. One load in flight at a time.
// Unforced loads read through the dashboard cache, so they are due once per TTL.

use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::dashboard::{Dashboard, Snapshot};

pub struct Loader {
    dashboard: Arc<Mutex<Dashboard>>,
    pending: Option<mpsc::Receiver<Snapshot>>,
    ttl: Duration,
    started_at: Option<Instant>,
}

impl Loader {
    pub fn new(dashboard: Dashboard) -> Self {
        let ttl = dashboard.ttl();
        Self { dashboard: Arc::new(Mutex::new(dashboard)), pending: None, ttl, started_at: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when nothing is loading and the last load is at least one TTL old.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.started_at {
            _ if self.pending.is_some() => false,
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.ttl,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a load unless one is running. `fresh` skips the read cache.
    pub fn start(&mut self, fresh: bool, on_done: impl FnOnce() + Send + 'static) {
        if self.pending.is_some() {
            return;
        }
        self.started_at = Some(Instant::now());
        let (tx, rx) = mpsc::channel();
        let dashboard = Arc::clone(&self.dashboard);
        thread::spawn(move || {
            let mut d = dashboard.lock().unwrap_or_else(PoisonError::into_inner);
            if fresh {
                d.refresh();
            }
            let snap = d.snapshot(Instant::now());
            drop(d);
            // receiver gone means the window closed
            let _ = tx.send(snap);
            on_done();
        });
        self.pending = Some(rx);
    }

    /// The finished snapshot, if the load is done.
    pub fn poll(&mut self) -> Option<Snapshot> {
        let rx = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(snap) => {
                self.pending = None;
                Some(snap)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                loge!("Load: worker exited without a snapshot");
                self.pending = None;
                None
            }
        }
    }
}
