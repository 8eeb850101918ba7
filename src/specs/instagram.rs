// src/specs/instagram.rs
//
// Instagram profile JSON (`?__a=1&__d=dis`). Needs a session cookie in practice.

use crate::config::consts::INSTAGRAM_PROFILE_URL;
use crate::core::extract::{Extractor, ExtractorChain};
use crate::core::net::{Fetch, Request};
use crate::error::Result;

/// Public web app id the site itself sends with XHRs.
const IG_APP_ID: &str = "936619743392459";

pub fn request(username: &str, cookie: Option<&str>) -> Request {
    Request::get(format!("{INSTAGRAM_PROFILE_URL}{username}/"))
        .query("__a", "1")
        .query("__d", "dis")
        .header("x-ig-app-id", IG_APP_ID)
        .header("accept", "application/json, text/html;q=0.9")
        .cookie(cookie)
}

fn chain() -> Result<ExtractorChain> {
    Ok(ExtractorChain::regexes(&[
        r#""edge_followed_by":\{"count":(\d+)\}"#,
        r#""edge_followed_by":\s?\{"count":\s?(\d+)\}"#,
    ])?
    .then(Extractor::pointer("/graphql/user/edge_followed_by/count"))
    .then(Extractor::pointer("/data/user/edge_followed_by/count")))
}

pub fn parse_followers(body: &str, username: &str) -> Result<u64> {
    chain()?.count(body, &format!("instagram {username}"))
}

pub fn fetch(http: &dyn Fetch, username: &str, cookie: Option<&str>) -> Result<u64> {
    let body = http.get_text(&request(username, cookie))?;
    parse_followers(&body, username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn compact_and_spaced_json() {
        let compact = r#"{"graphql":{"user":{"edge_followed_by":{"count":1200300}}}}"#;
        assert_eq!(parse_followers(compact, "u").unwrap(), 1_200_300);
        let spaced = r#"{"edge_followed_by": {"count": 42}}"#;
        assert_eq!(parse_followers(spaced, "u").unwrap(), 42);
    }

    #[test]
    fn newer_shape_via_pointer() {
        let body = r#"{"data":{"user":{"edge_followed_by":{"count":9,"page_info":{}}}}}"#;
        assert_eq!(parse_followers(body, "u").unwrap(), 9);
    }

    #[test]
    fn login_page_is_no_match() {
        assert!(matches!(parse_followers("<html>login</html>", "u"), Err(Error::NoMatch(_))));
    }

    #[test]
    fn request_shape() {
        let r = request("uverworld_official", Some("sessionid=abc"));
        assert_eq!(r.url, "https://www.instagram.com/uverworld_official/");
        assert!(r.query.contains(&(s!("__a"), s!("1"))));
        assert!(r.headers.contains(&(s!("cookie"), s!("sessionid=abc"))));
    }
}
