// src/models.rs
//
// Row types for the four store tables. Serialized field names are the column names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::consts::{TABLE_CALENDAR, TABLE_SNS_STATS, TABLE_SURVEY, TABLE_VIDEO_STATS};
use crate::error::{Error, Result};

/// A row type bound to its table.
pub trait Record: Serialize + DeserializeOwned {
    const TABLE: &'static str;
}

/* ---------------- sns_stats ---------------- */

/// One follower/subscriber count observation. Append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSample {
    pub platform: String,
    #[serde(deserialize_with = "int_or_numeric_text")]
    pub follower_count: u64,
    pub created_at: DateTime<Utc>,
}

impl MetricSample {
    /// Stamped with the capture time.
    pub fn now(platform: impl Into<String>, follower_count: u64) -> Self {
        Self { platform: platform.into(), follower_count, created_at: Utc::now() }
    }
}

impl Record for MetricSample {
    const TABLE: &'static str = TABLE_SNS_STATS;
}

/* ---------------- youtube_stats ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStat {
    pub title: String,
    #[serde(deserialize_with = "int_or_numeric_text")]
    pub views: u64,
    pub video_id: String,
    pub published_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Record for VideoStat {
    const TABLE: &'static str = TABLE_VIDEO_STATS;
}

/* ---------------- calendar_events ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Live,
    Release,
    Tv,
    Other,
}

impl Category {
    /// Map the site's own category word (TOUR, RADIO, GOODS, ...) onto ours.
    pub fn from_official(word: &str) -> Self {
        match word.to_ascii_uppercase().as_str() {
            "TOUR" | "LIVE" | "EVENT" => Self::Live,
            "RELEASE" => Self::Release,
            "TV" | "RADIO" | "MAGAZINE" => Self::Tv,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "LIVE",
            Self::Release => "RELEASE",
            Self::Tv => "TV",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub event_date: NaiveDate,
    pub category: Category,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Integer column that may arrive as `200`, `200.0` or `"200"`.
fn int_or_numeric_text<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: TryFrom<i64>,
{
    use serde::de::Error as _;

    let n = match NumOrText::deserialize(d)? {
        NumOrText::Int(n) => n,
        NumOrText::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
        NumOrText::Float(f) => return Err(D::Error::custom(format!("not a whole number: {f}"))),
        NumOrText::Text(t) => t
            .trim()
            .replace(',', "")
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("not a number: {t:?}")))?,
    };
    T::try_from(n).map_err(|_| D::Error::custom(format!("out of range: {n}")))
}

impl Record for ScheduleEvent {
    const TABLE: &'static str = TABLE_CALENDAR;
}

/* ---------------- survey_responses ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueType {
    #[serde(rename = "LIVE HOUSE")]
    LiveHouse,
    #[serde(rename = "HALL")]
    Hall,
    #[serde(rename = "ARENA")]
    Arena,
    #[serde(rename = "FES")]
    Fes,
    #[serde(rename = "OTHER")]
    Other,
}

impl VenueType {
    pub const ALL: [VenueType; 5] = [Self::LiveHouse, Self::Hall, Self::Arena, Self::Fes, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiveHouse => "LIVE HOUSE",
            Self::Hall => "HALL",
            Self::Arena => "ARENA",
            Self::Fes => "FES",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueType {
    type Err = Error;

    /// Accepts the column value in any case; `LIVEHOUSE` and `LIVE_HOUSE` too.
    fn from_str(s: &str) -> Result<Self> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().replace(' ', "") == norm)
            .ok_or_else(|| Error::Input(format!("unknown venue type {s:?}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub live_name: String,
    pub venue_type: VenueType,
    // some writers send the year as text
    #[serde(deserialize_with = "int_or_numeric_text")]
    pub event_year: i32,
    pub request_song: String,
    pub visits: String,
    pub prefecture: String,
    pub age: String,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

impl Record for SurveyResponse {
    const TABLE: &'static str = TABLE_SURVEY;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_mapping() {
        assert_eq!(Category::from_official("tour"), Category::Live);
        assert_eq!(Category::from_official("EVENT"), Category::Live);
        assert_eq!(Category::from_official("RADIO"), Category::Tv);
        assert_eq!(Category::from_official("RELEASE"), Category::Release);
        assert_eq!(Category::from_official("GOODS"), Category::Other);
        assert_eq!(Category::from_official(""), Category::Other);
    }

    #[test]
    fn venue_round_trips_through_column_text() {
        let v = serde_json::to_value(VenueType::LiveHouse).unwrap();
        assert_eq!(v, json!("LIVE HOUSE"));
        assert_eq!("live_house".parse::<VenueType>().unwrap(), VenueType::LiveHouse);
        assert_eq!(" fes ".parse::<VenueType>().unwrap(), VenueType::Fes);
        assert!("stadium".parse::<VenueType>().is_err());
    }

    #[test]
    fn store_rows_with_extra_columns_deserialize() {
        let row = json!({
            "id": 12,
            "platform": "x",
            "follower_count": 1500,
            "created_at": "2026-01-02T03:04:05.123456+00:00"
        });
        let m: MetricSample = serde_json::from_value(row).unwrap();
        assert_eq!(m.follower_count, 1500);

        let ev: ScheduleEvent = serde_json::from_value(json!({
            "event_date": "2026-02-13",
            "category": "LIVE",
            "title": "ARENA TOUR",
            "description": null
        }))
        .unwrap();
        assert_eq!(ev.category, Category::Live);
        assert_eq!(ev.event_date, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());
        assert_eq!(ev.description, "");
    }

    #[test]
    fn numeric_columns_accept_text() {
        let survey = |year: serde_json::Value| {
            serde_json::from_value::<SurveyResponse>(json!({
                "live_name": "ARENA", "venue_type": "ARENA", "event_year": year,
                "request_song": "IMPACT", "visits": "1回", "prefecture": "東京都",
                "age": "20代", "gender": "女性", "created_at": "2025-08-01T09:00:00Z"
            }))
        };
        assert_eq!(survey(json!("2025")).unwrap().event_year, 2025);
        assert_eq!(survey(json!(2026)).unwrap().event_year, 2026);
        assert!(survey(json!("last year")).is_err());

        let video = |views: serde_json::Value| {
            serde_json::from_value::<VideoStat>(json!({
                "title": "THE OVER", "views": views, "video_id": "v1",
                "published_at": null, "created_at": "2026-01-01T00:00:00Z"
            }))
        };
        assert_eq!(video(json!("1,200")).unwrap().views, 1200);
        assert_eq!(video(json!(300.0)).unwrap().views, 300);
        assert!(video(json!(-5)).is_err());
        assert!(video(json!(1.5)).is_err());

        let m: MetricSample =
            serde_json::from_value(json!({"platform": "x", "follower_count": " 42 ", "created_at": "2026-01-01T00:00:00Z"}))
                .unwrap();
        assert_eq!(m.follower_count, 42);
    }
}
