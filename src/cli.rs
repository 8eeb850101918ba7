// src/cli.rs
//! Command-line front end: one subcommand per ingestion job, plus `snapshot`.
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Instant,
};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::{consts::*, AppConfig},
    core::HttpClient,
    dashboard::{snapshot::write_report, Dashboard},
    ingest::BatchReport,
    models::VenueType,
    progress::ConsoleProgress,
    scrape::{self, SnsSelection, SurveyKey},
    store::{MemoryStore, RestStore, Store},
};

#[derive(Parser, Debug)]
#[command(name = "uver_sync", version, about = "Collect UVERworld stats into the shared store")]
pub struct Cli {
    /// Targets file (TOML). Defaults to the bundled targets.toml
    #[arg(long, global = true, env = "UVER_TARGETS")]
    pub config: Option<PathBuf>,

    /// Write into a throwaway in-memory store instead of the remote one
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// -v debug, -vv trace (RUST_LOG wins when set)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample follower counts (YouTube channel, Instagram, TikTok, X)
    Sns {
        /// Only these sources: a kind (tiktok) or a label (instagram_takuya)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },
    /// Record view counts of the configured music videos
    Videos,
    /// Scrape the official schedule and add events not yet stored
    Schedule {
        /// Page to scrape instead of the configured one
        #[arg(long)]
        url: Option<String>,
    },
    /// Import a fan-survey CSV, replacing earlier imports of the same live
    Survey(SurveyArgs),
    /// Append a follower count read off somewhere else
    Record { platform: String, count: u64 },
    /// Print the dashboard as text
    Snapshot,
}

#[derive(Args, Debug)]
pub struct SurveyArgs {
    /// CSV export (UTF-8 or Shift_JIS)
    pub path: PathBuf,

    /// Live name; without it the event is picked interactively
    #[arg(long, requires_all = ["date", "venue"])]
    pub live_name: Option<String>,

    /// Show date, YYYY-MM-DD
    #[arg(long, requires = "live_name", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    #[arg(long, requires = "live_name", value_parser = parse_venue)]
    pub venue: Option<VenueType>,

    /// Which earlier rows an import replaces
    #[arg(long, value_enum, default_value_t = KeyArg::NameYear)]
    pub key: KeyArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyArg {
    NameYear,
    NameDate,
}

impl From<KeyArg> for SurveyKey {
    fn from(k: KeyArg) -> Self {
        match k {
            KeyArg::NameYear => SurveyKey::NameYear,
            KeyArg::NameDate => SurveyKey::NameDate,
        }
    }
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("{s:?}: {e} (want YYYY-MM-DD)"))
}

fn parse_venue(s: &str) -> std::result::Result<VenueType, String> {
    s.parse::<VenueType>().map_err(|e| e.to_string())
}

/// Parse args, run one job, print its summary.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    crate::log::init(match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    });
    logd!("CLI: {:?}", cli);

    let cfg = AppConfig::load(cli.config.as_deref()).wrap_err("loading configuration")?;
    let http = HttpClient::new()?;

    let scratch = cli.dry_run.then(|| Arc::new(MemoryStore::new()));
    let store: Arc<dyn Store> = match &scratch {
        Some(m) => {
            logw!("dry run: writes go to an in-memory store");
            m.clone() as Arc<dyn Store>
        }
        None => Arc::new(RestStore::new(&http, cfg.credentials.require_store()?)) as Arc<dyn Store>,
    };

    let mut progress = ConsoleProgress::default();
    let report = match cli.command {
        Command::Sns { only } => {
            let sel = SnsSelection::from_names(&only);
            scrape::collect_sns(&cfg, &http, store.as_ref(), &sel, &mut progress)?
        }
        Command::Videos => scrape::collect_videos(&cfg, &http, store.as_ref(), &mut progress)?,
        Command::Schedule { url } => {
            let url = url.unwrap_or_else(|| cfg.targets.schedule.url.clone());
            scrape::sync_schedule(&url, &http, store.as_ref(), &mut progress)?
        }
        Command::Survey(args) => survey(store.as_ref(), args, &mut progress)?,
        Command::Record { platform, count } => {
            let s = scrape::record_metric(store.as_ref(), &platform, count)?;
            println!("{} = {} at {}", s.platform, s.follower_count, s.created_at.to_rfc3339());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Snapshot => {
            let snap = Dashboard::new(store).snapshot(Instant::now());
            let mut out = io::stdout().lock();
            write_report(&mut out, &snap, Local::now().date_naive())?;
            out.flush()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    if let Some(m) = scratch {
        for table in [TABLE_SNS_STATS, TABLE_VIDEO_STATS, TABLE_CALENDAR, TABLE_SURVEY] {
            let n = m.rows(table).len();
            if n > 0 {
                println!("dry run: {n} row(s) would be in {table}");
            }
        }
    }
    Ok(exit_code(&report))
}

fn survey(store: &dyn Store, args: SurveyArgs, progress: &mut ConsoleProgress) -> crate::error::Result<BatchReport> {
    let target = match (args.live_name, args.date, args.venue) {
        (Some(name), Some(date), Some(venue)) => scrape::target_from(&name, date, venue),
        _ => {
            let events = scrape::recent_live_events(store)?;
            let stdin = io::stdin();
            scrape::prompt_target(&mut stdin.lock(), &mut io::stdout(), &events)?
        }
    };
    scrape::import_survey(store, &args.path, &target, args.key.into(), progress)
}

/// Partial failures are normal for scrapers; only a batch where nothing worked fails the run.
pub fn exit_code(r: &BatchReport) -> ExitCode {
    println!(
        "{} ok, {} failed ({} rate limited), {} skipped; rows: +{} -{} ={}",
        r.succeeded, r.failed, r.rate_limited, r.skipped,
        r.writes.inserted, r.writes.deleted, r.writes.already_present
    );
    if r.failed > 0 && r.succeeded == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("uver_sync").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sns_only_takes_a_comma_list() {
        let cli = parse(&["sns", "--only", "tiktok,instagram_takuya", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
        match cli.command {
            Command::Sns { only } => assert_eq!(only, vec!["tiktok", "instagram_takuya"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn survey_needs_the_whole_target_or_none() {
        assert!(parse(&["survey", "a.csv", "--live-name", "ARENA"]).is_err());
        assert!(parse(&["survey", "a.csv", "--venue", "hall"]).is_err());

        let cli = parse(&[
            "survey", "a.csv", "--live-name", "ARENA", "--date", "2025-08-01", "--venue", "live house", "--key", "name-date",
        ])
        .unwrap();
        let Command::Survey(a) = cli.command else { panic!("not survey") };
        assert_eq!(a.venue, Some(VenueType::LiveHouse));
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2025, 8, 1));
        assert_eq!(SurveyKey::from(a.key), SurveyKey::NameDate);

        let Command::Survey(a) = parse(&["survey", "b.csv"]).unwrap().command else { panic!("not survey") };
        assert_eq!(a.live_name, None);
        assert_eq!(a.key, KeyArg::NameYear);
    }

    #[test]
    fn bad_dates_are_rejected() {
        assert!(parse_date("2025/08/01").is_err());
        assert!(parse(&["survey", "a.csv", "--live-name", "A", "--date", "soon", "--venue", "fes"]).is_err());
    }

    #[test]
    fn total_failure_is_a_failing_exit() {
        let mut r = BatchReport { failed: 2, ..BatchReport::default() };
        assert_eq!(exit_code(&r), ExitCode::FAILURE);
        r.succeeded = 1;
        assert_eq!(exit_code(&r), ExitCode::SUCCESS);
    }
}
