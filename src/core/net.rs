// src/core/net.rs
//
// Blocking HTTP GET/JSON helpers. One client per job, requests strictly sequential.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, COOKIE};
use reqwest::StatusCode;

use crate::config::consts::{ACCEPT_LANGUAGE as LANG, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// Describes one fetch: URL plus extra headers (cookie, accept, ...).
#[derive(Clone, Debug, Default)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn query(mut self, k: &str, v: impl Into<String>) -> Self {
        self.query.push((s!(k), v.into()));
        self
    }

    pub fn header(mut self, k: &str, v: impl Into<String>) -> Self {
        self.headers.push((s!(k), v.into()));
        self
    }

    /// Attach a cookie if one is configured.
    pub fn cookie(self, cookie: Option<&str>) -> Self {
        match cookie {
            Some(c) if !c.is_empty() => self.header(COOKIE.as_str(), c),
            _ => self,
        }
    }
}

/// Text GET seam. `HttpClient` is the real one; tests serve fixtures.
pub trait Fetch {
    fn get_text(&self, req: &Request) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let mut defaults = HeaderMap::new();
        defaults.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANG));

        let inner = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(defaults)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { inner })
    }

    /// Underlying client, for the store which needs other verbs.
    pub fn raw(&self) -> &Client { &self.inner }

    fn send(&self, req: &Request) -> Result<Response> {
        let mut rb = self.inner.get(&req.url);
        if !req.query.is_empty() {
            rb = rb.query(&req.query);
        }
        rb = rb.headers(header_map(&req.headers)?);

        logd!("GET {}", req.url);
        let resp = rb.send()?;
        check_status(resp.status(), &req.url)?;
        Ok(resp)
    }
}

impl Fetch for HttpClient {
    /// GET and return the body as text. Non-2xx is an error.
    fn get_text(&self, req: &Request) -> Result<String> {
        Ok(self.send(req)?.text()?)
    }
}

pub fn check_status(status: StatusCode, url: &str) -> Result<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited { url: s!(url) });
    }
    if !status.is_success() {
        return Err(Error::Http { status: status.as_u16(), url: s!(url) });
    }
    Ok(())
}

pub fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| Error::Config(format!("bad header name {k}: {e}")))?;
        let value = HeaderValue::from_str(v)
            .map_err(|e| Error::Config(format!("bad header value for {k}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(check_status(StatusCode::OK, "u").is_ok());
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, "u"),
            Err(Error::RateLimited { .. })
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN, "u"),
            Err(Error::Http { status: 403, .. })
        ));
    }

    #[test]
    fn cookie_only_when_present() {
        let r = Request::get("https://example.com").cookie(None).cookie(Some(""));
        assert!(r.headers.is_empty());
        let r = r.cookie(Some("sid=1"));
        assert_eq!(r.headers, vec![(s!("cookie"), s!("sid=1"))]);
    }

    #[test]
    fn header_map_rejects_garbage() {
        assert!(header_map(&[(s!("bad name"), s!("v"))]).is_err());
        assert!(header_map(&[(s!("apikey"), s!("abc"))]).is_ok());
    }
}
