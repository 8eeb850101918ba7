// src/specs/youtube.rs
//
// YouTube Data API v3: channel subscriber count and per-video statistics.

use chrono::NaiveDate;
use serde_json::Value;

use crate::config::consts::YOUTUBE_API_BASE;
use crate::core::extract::{Extractor, ExtractorChain};
use crate::core::net::{Fetch, Request};
use crate::error::{Error, Result};

pub fn channel_request(api_key: &str, channel_id: &str) -> Request {
    Request::get(format!("{YOUTUBE_API_BASE}/channels"))
        .query("part", "statistics")
        .query("id", channel_id)
        .query("key", api_key)
}

pub fn video_request(api_key: &str, video_id: &str) -> Request {
    Request::get(format!("{YOUTUBE_API_BASE}/videos"))
        .query("part", "statistics,snippet")
        .query("id", video_id)
        .query("key", api_key)
}

/// The API reports quota and key problems in the body as `{"error": {...}}`.
fn check_api_error(doc: &Value) -> Result<()> {
    if let Some(err) = doc.get("error") {
        let msg = err
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| err.to_string());
        return Err(Error::Api(msg));
    }
    Ok(())
}

fn first_item<'a>(doc: &'a Value, what: &str) -> Result<&'a Value> {
    check_api_error(doc)?;
    doc.get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .ok_or_else(|| Error::NoMatch(format!("{what} (no items)")))
}

pub fn parse_channel(body: &str, channel_id: &str) -> Result<u64> {
    let doc: Value = serde_json::from_str(body)?;
    first_item(&doc, channel_id)?;
    ExtractorChain::new(vec![Extractor::pointer("/items/0/statistics/subscriberCount")])
        .count(body, channel_id)
}

pub fn fetch_subscribers(http: &dyn Fetch, api_key: &str, channel_id: &str) -> Result<u64> {
    let body = http.get_text(&channel_request(api_key, channel_id))?;
    parse_channel(&body, channel_id)
}

/// What the videos endpoint tells us about one video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSnapshot {
    pub views: u64,
    pub published_at: Option<NaiveDate>,
    pub api_title: Option<String>,
}

pub fn parse_video(body: &str, video_id: &str) -> Result<VideoSnapshot> {
    let doc: Value = serde_json::from_str(body)?;
    let item = first_item(&doc, video_id)?;

    let views = ExtractorChain::new(vec![Extractor::pointer("/items/0/statistics/viewCount")])
        .count(body, video_id)?;

    let snippet = item.get("snippet");
    // publishedAt is RFC 3339; the date part is all we keep
    let published_at = snippet
        .and_then(|s| s.get("publishedAt"))
        .and_then(Value::as_str)
        .and_then(|s| s.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    let api_title = snippet
        .and_then(|s| s.get("title"))
        .and_then(Value::as_str)
        .map(String::from);

    Ok(VideoSnapshot { views, published_at, api_title })
}

pub fn fetch_video(http: &dyn Fetch, api_key: &str, video_id: &str) -> Result<VideoSnapshot> {
    let body = http.get_text(&video_request(api_key, video_id))?;
    parse_video(&body, video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_count_from_string_field() {
        let body = r#"{"items":[{"id":"UC1","statistics":{"subscriberCount":"1234000","viewCount":"9"}}]}"#;
        assert_eq!(parse_channel(body, "UC1").unwrap(), 1_234_000);
    }

    #[test]
    fn api_error_body() {
        let body = r#"{"error":{"code":403,"message":"quotaExceeded"}}"#;
        assert!(matches!(parse_channel(body, "UC1"), Err(Error::Api(m)) if m == "quotaExceeded"));
    }

    #[test]
    fn empty_items_is_no_match() {
        assert!(matches!(parse_video(r#"{"items":[]}"#, "abc"), Err(Error::NoMatch(_))));
    }

    #[test]
    fn video_views_and_date() {
        let body = r#"{"items":[{"statistics":{"viewCount":"5000"},
            "snippet":{"publishedAt":"2012-07-20T09:00:01Z","title":"UVERworld 『7th Trigger』"}}]}"#;
        let v = parse_video(body, "FAU7NyiqwQY").unwrap();
        assert_eq!(v.views, 5000);
        assert_eq!(v.published_at, NaiveDate::from_ymd_opt(2012, 7, 20));
        assert_eq!(v.api_title.as_deref(), Some("UVERworld 『7th Trigger』"));
    }

    #[test]
    fn requests_carry_key_and_parts() {
        let r = video_request("K", "vid");
        assert!(r.url.ends_with("/videos"));
        assert!(r.query.contains(&(s!("part"), s!("statistics,snippet"))));
        assert!(r.query.contains(&(s!("key"), s!("K"))));
    }
}
