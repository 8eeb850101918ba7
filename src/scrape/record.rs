// src/scrape/record.rs
use crate::{
    error::{Error, Result},
    models::MetricSample,
    reconcile::{reconcile_records, Policy},
    store::Store,
};

/// Append an operator-supplied follower count (numbers read off an app, a press release, ...).
pub fn record_metric(store: &dyn Store, platform: &str, follower_count: u64) -> Result<MetricSample> {
    let platform = platform.trim();
    if platform.is_empty() {
        return Err(Error::Input(s!("platform must not be empty")));
    }
    let sample = MetricSample::now(platform, follower_count);
    reconcile_records(store, &Policy::AppendOnly, std::slice::from_ref(&sample))?;
    logf!("recorded {} = {}", sample.platform, sample.follower_count);
    Ok(sample)
}
