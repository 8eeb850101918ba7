// tests/sns_jobs.rs
mod common;

use chrono::{DateTime, Utc};
use serde_json::Value;

use common::{channel_json, config, video_json, Fixtures};
use uver_sync::progress::NullProgress;
use uver_sync::scrape::{collect_sns, collect_videos, SnsSelection};
use uver_sync::store::MemoryStore;
use uver_sync::Error;

fn ts(row: &Value) -> DateTime<Utc> {
    row["created_at"].as_str().unwrap().parse().unwrap()
}

fn social_fixtures() -> Fixtures {
    Fixtures::new()
        .body("youtube/v3/channels", &channel_json(1_230_000))
        .body("instagram.com/uverworld_official", r#"{"graphql":{"user":{"edge_followed_by":{"count":456789}}}}"#)
        .body("tiktok.com/@uver_takuya8", r#"<script id="__UNIVERSAL_DATA__">{"stats":{"followerCount":98765}}</script>"#)
        .body("x.com/UVERworld_dR2", r#"<script>{"legacy":{"followers_count":345678}}</script>"#)
}

#[test]
fn one_row_per_source_with_non_decreasing_timestamps() {
    let store = MemoryStore::new();
    let http = social_fixtures();
    let report = collect_sns(&config(Some("k")), &http, &store, &SnsSelection::All, &mut NullProgress).unwrap();

    assert_eq!(report.succeeded, 4);
    assert_eq!(report.writes.inserted, 4);

    let rows = store.rows("sns_stats");
    let platforms: Vec<&str> = rows.iter().map(|r| r["platform"].as_str().unwrap()).collect();
    assert_eq!(platforms, vec!["youtube", "instagram", "tiktok_takuya", "x"]);
    assert_eq!(rows[0]["follower_count"], 1_230_000);
    assert_eq!(rows[3]["follower_count"], 345_678);
    assert!(rows.windows(2).all(|w| ts(&w[0]) <= ts(&w[1])));
}

#[test]
fn a_failing_source_does_not_stop_the_others() {
    let store = MemoryStore::new();
    let http = Fixtures::new()
        .status("instagram.com", 500)
        .too_many("tiktok.com")
        .body("x.com", "<html>login wall</html>")
        .body("youtube/v3/channels", &channel_json(10));

    let report = collect_sns(&config(Some("k")), &http, &store, &SnsSelection::All, &mut NullProgress).unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 2);
    assert_eq!(report.rate_limited, 1);
    assert_eq!(report.skipped, 1, "no count on the X page is a skip");
    assert_eq!(store.rows("sns_stats").len(), 1);
    assert_eq!(http.seen.borrow().len(), 4);
}

#[test]
fn missing_youtube_key_fails_before_any_fetch() {
    let store = MemoryStore::new();
    let http = social_fixtures();
    let err = collect_sns(&config(None), &http, &store, &SnsSelection::All, &mut NullProgress).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(http.seen.borrow().is_empty());
    assert!(store.rows("sns_stats").is_empty());
}

#[test]
fn selection_limits_the_sources_and_skips_the_key_check() {
    let store = MemoryStore::new();
    let http = social_fixtures();
    let sel = SnsSelection::from_names(&["tiktok".to_string()]);
    let report = collect_sns(&config(None), &http, &store, &sel, &mut NullProgress).unwrap();

    assert_eq!(report.succeeded, 1);
    let rows = store.rows("sns_stats");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["platform"], "tiktok_takuya");
    assert_eq!(rows[0]["follower_count"], 98_765);
}

#[test]
fn store_failure_is_logged_per_source() {
    let store = MemoryStore::new();
    store.fail_writes_to("sns_stats");
    let http = social_fixtures();
    let report = collect_sns(&config(Some("k")), &http, &store, &SnsSelection::All, &mut NullProgress).unwrap();

    assert_eq!(report.failed, 4);
    assert_eq!(report.succeeded, 0);
}

#[test]
fn videos_keep_the_configured_title() {
    let store = MemoryStore::new();
    let http = Fixtures::new()
        .body("id=vid_a", &video_json(5_000_000, "2019-02-13T09:00:00Z"))
        .body("id=vid_b", &video_json(1_200, "2024-06-01T12:00:00Z"));

    let report = collect_videos(&config(Some("k")), &http, &store, &mut NullProgress).unwrap();
    assert_eq!(report.succeeded, 2);

    let rows = store.rows("youtube_stats");
    assert_eq!(rows[0]["title"], "『IMPACT』");
    assert_eq!(rows[0]["video_id"], "vid_a");
    assert_eq!(rows[0]["views"], 5_000_000);
    assert_eq!(rows[0]["published_at"], "2019-02-13");
    assert_eq!(rows[1]["title"], "『PHOENIX』");
    assert!(ts(&rows[0]) <= ts(&rows[1]));
}

#[test]
fn videos_need_the_api_key() {
    let store = MemoryStore::new();
    let err = collect_videos(&config(None), &Fixtures::new(), &store, &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
