// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;

use uver_sync::config::{options::Targets, AppConfig, Credentials};
use uver_sync::core::net::{Fetch, Request};
use uver_sync::{Error, Result};

pub enum Reply {
    Body(String),
    Status(u16),
    TooMany,
}

/// Serves canned bodies by URL substring; unknown URLs are 404.
#[derive(Default)]
pub struct Fixtures {
    routes: Vec<(String, Reply)>,
    pub seen: RefCell<Vec<String>>,
}

impl Fixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, needle: &str, body: &str) -> Self {
        self.routes.push((needle.to_string(), Reply::Body(body.to_string())));
        self
    }

    pub fn status(mut self, needle: &str, status: u16) -> Self {
        self.routes.push((needle.to_string(), Reply::Status(status)));
        self
    }

    pub fn too_many(mut self, needle: &str) -> Self {
        self.routes.push((needle.to_string(), Reply::TooMany));
        self
    }
}

impl Fetch for Fixtures {
    fn get_text(&self, req: &Request) -> Result<String> {
        let query: Vec<String> = req.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let key = format!("{}?{}", req.url, query.join("&"));
        self.seen.borrow_mut().push(key.clone());

        match self.routes.iter().find(|(needle, _)| key.contains(needle.as_str())) {
            Some((_, Reply::Body(b))) => Ok(b.clone()),
            Some((_, Reply::Status(s))) => Err(Error::Http { status: *s, url: req.url.clone() }),
            Some((_, Reply::TooMany)) => Err(Error::RateLimited { url: req.url.clone() }),
            None => Err(Error::Http { status: 404, url: req.url.clone() }),
        }
    }
}

pub const TARGETS: &str = r#"
instagram = [{ username = "uverworld_official", label = "instagram" }]
tiktok = [{ username = "uver_takuya8", label = "tiktok_takuya" }]
x = [{ username = "UVERworld_dR2", label = "x" }]

[youtube]
channel_id = "UCchannel"
videos = [
  { id = "vid_a", title = "『IMPACT』" },
  { id = "vid_b", title = "『PHOENIX』" },
]

[pacing]
social_pause_secs = 0
rate_limit_pause_secs = 0
"#;

pub fn config(youtube_key: Option<&str>) -> AppConfig {
    AppConfig {
        credentials: Credentials {
            youtube_api_key: youtube_key.map(String::from),
            ..Credentials::default()
        },
        targets: Targets::parse(TARGETS).expect("fixture targets"),
    }
}

pub fn channel_json(subs: u64) -> String {
    format!(r#"{{"items":[{{"statistics":{{"subscriberCount":"{subs}","viewCount":"1"}}}}]}}"#)
}

pub fn video_json(views: u64, published: &str) -> String {
    format!(
        r#"{{"items":[{{"snippet":{{"title":"UVERworld API title","publishedAt":"{published}"}},"statistics":{{"viewCount":"{views}"}}}}]}}"#
    )
}
