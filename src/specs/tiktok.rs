// src/specs/tiktok.rs
//
// TikTok profile page. The count sits in the embedded hydration JSON.

use crate::config::consts::TIKTOK_PROFILE_URL;
use crate::core::extract::ExtractorChain;
use crate::core::net::{Fetch, Request};
use crate::error::Result;

const PATTERNS: &[&str] = &[
    r#""followerCount":(\d+)"#,
    // escaped inside a JSON string
    r#"followerCount\\?":\s?(\d+)"#,
];

pub fn request(username: &str, cookie: Option<&str>) -> Request {
    Request::get(format!("{TIKTOK_PROFILE_URL}{username}")).cookie(cookie)
}

pub fn parse_followers(body: &str, username: &str) -> Result<u64> {
    ExtractorChain::regexes(PATTERNS)?.count(body, &format!("tiktok @{username}"))
}

pub fn fetch(http: &dyn Fetch, username: &str, cookie: Option<&str>) -> Result<u64> {
    let body = http.get_text(&request(username, cookie))?;
    parse_followers(&body, username)
}
