// src/scrape/sns.rs
use crate::{
    config::AppConfig,
    core::net::Fetch,
    error::{Error, Result},
    ingest::{run_batch, BatchReport, CaptureClock},
    models::MetricSample,
    progress::Progress,
    reconcile::{reconcile_records, Policy},
    specs::{youtube, Platform},
    store::Store,
};

/// One follower count to sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnsSource {
    YoutubeChannel { channel_id: String, label: String },
    Profile { platform: Platform, username: String, label: String },
}

impl SnsSource {
    /// Platform key written to `sns_stats`.
    pub fn label(&self) -> &str {
        match self {
            Self::YoutubeChannel { label, .. } | Self::Profile { label, .. } => label,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::YoutubeChannel { .. } => "youtube",
            Self::Profile { platform, .. } => platform.as_str(),
        }
    }
}

/// Which sources an `sns` run touches. Names match a kind (`tiktok`) or a label (`instagram_takuya`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SnsSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl SnsSelection {
    pub fn from_names(names: &[String]) -> Self {
        if names.is_empty() {
            Self::All
        } else {
            Self::Only(names.iter().map(|n| n.trim().to_ascii_lowercase()).collect())
        }
    }

    fn wants(&self, src: &SnsSource) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names
                .iter()
                .any(|n| n == src.kind() || n.eq_ignore_ascii_case(src.label())),
        }
    }
}

/// Sources in run order: YouTube channel first, then Instagram, TikTok, X.
pub fn sources(cfg: &AppConfig, sel: &SnsSelection) -> Vec<SnsSource> {
    let t = &cfg.targets;
    let mut out = vec![SnsSource::YoutubeChannel {
        channel_id: t.youtube.channel_id.clone(),
        label: t.youtube.channel_label.clone(),
    }];
    for (platform, accounts) in [
        (Platform::Instagram, &t.instagram),
        (Platform::Tiktok, &t.tiktok),
        (Platform::X, &t.x),
    ] {
        out.extend(accounts.iter().map(|a| SnsSource::Profile {
            platform,
            username: a.username.clone(),
            label: a.label.clone(),
        }));
    }
    out.retain(|s| sel.wants(s));
    out
}

fn cookie_for(cfg: &AppConfig, platform: Platform) -> Option<&str> {
    let c = &cfg.credentials;
    match platform {
        Platform::Instagram => c.instagram_cookie.as_deref(),
        Platform::Tiktok => c.tiktok_cookie.as_deref(),
        Platform::X => c.x_cookie.as_deref(),
    }
}

/// Sample every selected follower count and append one `sns_stats` row each.
pub fn collect_sns(
    cfg: &AppConfig,
    http: &dyn Fetch,
    store: &dyn Store,
    sel: &SnsSelection,
    progress: &mut dyn Progress,
) -> Result<BatchReport> {
    let srcs = sources(cfg, sel);
    if srcs.is_empty() {
        return Err(Error::Input(format!("no sns source matches {sel:?}")));
    }
    // fail before any fetch rather than halfway through the batch
    if srcs.iter().any(|s| matches!(s, SnsSource::YoutubeChannel { .. })) {
        cfg.credentials.require_youtube_key()?;
    }

    progress.log(&format!("Sampling {} follower count(s)…", srcs.len()));
    let mut clock = CaptureClock::default();

    run_batch(&srcs, |s| s!(s.label()), &cfg.targets.pacing, progress, |src| {
        let count = match src {
            SnsSource::YoutubeChannel { channel_id, .. } => {
                let key = cfg.credentials.require_youtube_key()?;
                youtube::fetch_subscribers(http, key, channel_id)?
            }
            SnsSource::Profile { platform, username, .. } => {
                platform.fetch_followers(http, username, cookie_for(cfg, *platform))?
            }
        };
        let sample = MetricSample {
            platform: s!(src.label()),
            follower_count: count,
            created_at: clock.now(),
        };
        logd!("{}: {} followers", sample.platform, sample.follower_count);
        reconcile_records(store, &Policy::AppendOnly, &[sample])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Targets};

    fn cfg() -> AppConfig {
        AppConfig { credentials: Credentials::default(), targets: Targets::bundled().unwrap() }
    }

    #[test]
    fn all_sources_in_order() {
        let srcs = sources(&cfg(), &SnsSelection::All);
        assert_eq!(srcs[0].kind(), "youtube");
        let labels: Vec<_> = srcs.iter().map(|s| s.label()).collect();
        assert!(labels.contains(&"instagram_takuya"));
        assert!(labels.contains(&"tiktok_takuya"));
        assert_eq!(*labels.last().unwrap(), "x");
    }

    #[test]
    fn selection_by_kind_or_label() {
        let sel = SnsSelection::from_names(&[s!("TikTok"), s!("instagram_takuya")]);
        let labels: Vec<_> = sources(&cfg(), &sel).iter().map(|s| s!(s.label())).collect();
        assert_eq!(labels, vec![s!("instagram_takuya"), s!("tiktok_takuya")]);
    }

    #[test]
    fn youtube_without_key_is_fatal_up_front() {
        struct NoNet;
        impl Fetch for NoNet {
            fn get_text(&self, _: &crate::core::net::Request) -> Result<String> {
                panic!("must not fetch")
            }
        }
        let store = crate::store::MemoryStore::new();
        let r = collect_sns(&cfg(), &NoNet, &store, &SnsSelection::All, &mut crate::progress::NullProgress);
        assert!(matches!(r, Err(Error::Config(_))));
    }
}
