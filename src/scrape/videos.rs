// src/scrape/videos.rs
use crate::{
    config::{
        options::{Pacing, VideoTarget},
        AppConfig,
    },
    core::net::Fetch,
    error::Result,
    ingest::{run_batch, BatchReport, CaptureClock},
    models::VideoStat,
    progress::Progress,
    reconcile::{reconcile_records, Policy},
    specs::youtube,
    store::Store,
};

/// Fetch view counts for every configured video; one `youtube_stats` row per video.
/// The stored title is the configured display title, not the API's.
pub fn collect_videos(
    cfg: &AppConfig,
    http: &dyn Fetch,
    store: &dyn Store,
    progress: &mut dyn Progress,
) -> Result<BatchReport> {
    let key = cfg.credentials.require_youtube_key()?;
    let videos = &cfg.targets.youtube.videos;
    progress.log(&format!("Fetching stats for {} video(s)…", videos.len()));

    let mut clock = CaptureClock::default();
    // API calls: no scraping politeness pause needed, only the 429 pause
    let pacing = Pacing {
        social_pause_secs: 0,
        ..cfg.targets.pacing.clone()
    };

    run_batch(videos, |v: &VideoTarget| v.title.clone(), &pacing, progress, |v| {
        let snap = youtube::fetch_video(http, key, &v.id)?;
        let row = VideoStat {
            title: v.title.clone(),
            views: snap.views,
            video_id: v.id.clone(),
            published_at: snap.published_at,
            created_at: clock.now(),
        };
        reconcile_records(store, &Policy::AppendOnly, &[row])
    })
}
