// src/scrape/mod.rs
//! Ingestion jobs. Each one fetches through `specs`, reconciles into the store
//! and returns a `BatchReport`.
mod record;
mod schedule;
mod sns;
mod survey;
mod videos;

pub use record::record_metric;
pub use schedule::{sync_schedule, SCHEDULE_KEY};
pub use sns::{collect_sns, sources as sns_sources, SnsSelection, SnsSource};
pub use survey::{import_survey, prompt_target, recent_live_events, target_from, SurveyKey};
pub use videos::collect_videos;
