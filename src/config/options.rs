// src/config/options.rs
use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use super::consts::*;
use crate::error::{Error, Result};

/// Bundled default targets (repository `targets.toml`).
pub const DEFAULT_TARGETS: &str = include_str!("../../targets.toml");

/// Everything a job needs, built once in `main` and passed down.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub targets: Targets,
}

impl AppConfig {
    /// Credentials from the process environment, targets from `path` or the bundled defaults.
    pub fn load(targets_path: Option<&Path>) -> Result<Self> {
        Self::load_with(targets_path, |k| std::env::var(k).ok())
    }

    pub fn load_with<F>(targets_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = match targets_path {
            Some(p) => Targets::from_file(p)?,
            None => Targets::bundled()?,
        };
        Ok(Self { credentials: Credentials::from_lookup(lookup), targets })
    }
}

/* ---------------- Credentials ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
    /// Server-side function doing delete+insert in one transaction, if deployed.
    pub replace_rpc: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub store: Option<StoreConfig>,
    pub youtube_api_key: Option<String>,
    pub instagram_cookie: Option<String>,
    pub tiktok_cookie: Option<String>,
    pub x_cookie: Option<String>,
}

impl Credentials {
    /// Read credentials through `lookup` (normally `std::env::var`).
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .filter_map(|k| lookup(k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let url = get(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]);
        let key = get(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]);
        let store = match (url, key) {
            (Some(url), Some(key)) => Some(StoreConfig {
                url: url.trim_end_matches('/').to_string(),
                key,
                replace_rpc: get(&["SUPABASE_REPLACE_RPC"]),
            }),
            _ => None,
        };

        Self {
            store,
            youtube_api_key: get(&["YOUTUBE_API_KEY"]),
            instagram_cookie: get(&["INSTAGRAM_COOKIE"]),
            tiktok_cookie: get(&["TIKTOK_COOKIE"]),
            x_cookie: get(&["X_COOKIE"]),
        }
    }

    pub fn require_store(&self) -> Result<&StoreConfig> {
        self.store.as_ref().ok_or_else(|| {
            Error::Config(s!("SUPABASE_URL / SUPABASE_KEY are not set"))
        })
    }

    pub fn require_youtube_key(&self) -> Result<&str> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| Error::Config(s!("YOUTUBE_API_KEY is not set")))
    }
}

/* ---------------- Targets ---------------- */

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Targets {
    pub youtube: YoutubeTargets,
    #[serde(default)]
    pub instagram: Vec<Account>,
    #[serde(default)]
    pub tiktok: Vec<Account>,
    #[serde(default)]
    pub x: Vec<Account>,
    #[serde(default)]
    pub schedule: ScheduleTarget,
    #[serde(default)]
    pub pacing: Pacing,
}

impl Targets {
    pub fn bundled() -> Result<Self> {
        Self::parse(DEFAULT_TARGETS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct YoutubeTargets {
    pub channel_id: String,
    #[serde(default = "default_youtube_label")]
    pub channel_label: String,
    #[serde(default)]
    pub videos: Vec<VideoTarget>,
}

fn default_youtube_label() -> String { s!("youtube") }

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct VideoTarget {
    pub id: String,
    /// Display title stored with each sample (the API title is noisier)
    pub title: String,
}

/// A social account to sample. `label` is the platform key stored in `sns_stats`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ScheduleTarget {
    pub url: String,
}

impl Default for ScheduleTarget {
    fn default() -> Self {
        Self { url: s!(DEFAULT_SCHEDULE_URL) }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pacing {
    /// Pause between consecutive social-page fetches
    pub social_pause_secs: u64,
    /// Pause after an HTTP 429 before moving on
    pub rate_limit_pause_secs: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            social_pause_secs: SOCIAL_PAUSE_SECS,
            rate_limit_pause_secs: RATE_LIMIT_PAUSE_SECS,
        }
    }
}

impl Pacing {
    pub fn social_pause(&self) -> Duration { Duration::from_secs(self.social_pause_secs) }
    pub fn rate_limit_pause(&self) -> Duration { Duration::from_secs(self.rate_limit_pause_secs) }

    /// No sleeping at all (tests, dry runs).
    pub fn none() -> Self {
        Self { social_pause_secs: 0, rate_limit_pause_secs: 0 }
    }
}
