// src/specs/mod.rs
//! # Source “specs” module
//!
//! One module per remote source. Each spec knows **where the number or rows live**
//! in one page or endpoint, and how to pull them out tolerantly.
//!
//! ## What lives here
//! - Request shapes (URL, query, cookie/header needs) per source.
//! - Parsing: ordered `ExtractorChain`s for counts (regex, then JSON pointer),
//!   block scanning for the schedule page, column mapping for survey CSVs.
//! - Light shaping into `models` row types.
//!
//! ## What does **not** live here
//! - Writing to the store, pacing, batch accounting: that is `scrape::*`.
//! - Presentation: `dashboard` and `gui`.
//!
//! ## Typical call chain
//! ```text
//! CLI → scrape::collect_* → specs::<source>::fetch()
//!                        ↘  reconcile::reconcile (outside of specs)
//! ```
//!
//! Every parser is a plain function over text so tests run offline on fixtures.

pub mod instagram;
pub mod schedule;
pub mod survey;
pub mod tiktok;
pub mod x;
pub mod youtube;

use std::fmt;

use crate::core::net::Fetch;
use crate::error::Result;

/// Profile-page follower sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Tiktok,
    X,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::X => "x",
        }
    }

    pub fn fetch_followers(&self, http: &dyn Fetch, username: &str, cookie: Option<&str>) -> Result<u64> {
        match self {
            Self::Instagram => instagram::fetch(http, username, cookie),
            Self::Tiktok => tiktok::fetch(http, username, cookie),
            Self::X => x::fetch(http, username, cookie),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
