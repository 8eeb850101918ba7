// src/specs/x.rs
//
// X (Twitter) profile page. Only the server-rendered JSON is read.

use crate::config::consts::X_PROFILE_URL;
use crate::core::extract::ExtractorChain;
use crate::core::net::{Fetch, Request};
use crate::error::Result;

const PATTERNS: &[&str] = &[
    r#""followers_count":(\d+)"#,
    r#"followers_count\\?":\s?(\d+)"#,
    r#""normal_followers_count":(\d+)"#,
];

pub fn request(username: &str, cookie: Option<&str>) -> Request {
    Request::get(format!("{X_PROFILE_URL}{username}")).cookie(cookie)
}

pub fn parse_followers(body: &str, username: &str) -> Result<u64> {
    ExtractorChain::regexes(PATTERNS)?.count(body, &format!("x @{username}"))
}

pub fn fetch(http: &dyn Fetch, username: &str, cookie: Option<&str>) -> Result<u64> {
    let body = http.get_text(&request(username, cookie))?;
    parse_followers(&body, username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_followers_count() {
        let body = r#"{"legacy":{"followers_count":350123,"friends_count":10}}"#;
        assert_eq!(parse_followers(body, "u").unwrap(), 350_123);
    }

    #[test]
    fn falls_back_to_normal_count() {
        let body = r#"{"normal_followers_count":12}"#;
        assert_eq!(parse_followers(body, "u").unwrap(), 12);
    }
}
