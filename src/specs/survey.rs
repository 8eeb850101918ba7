// src/specs/survey.rs
//
// Fan survey CSV → SurveyResponse rows.
//
// Columns read: 曲名 (request song), 項目2 (attendance, e.g. "3回目"),
// 年齢 (age), 都道府県名 (prefecture), 性別 (gender). Any may be missing or blank.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::config::consts::{SURVEY_TIME_OF_DAY, UNANSWERED};
use crate::core::csv::{decode_bytes, Table};
use crate::core::sanitize::first_number;
use crate::error::{Error, Result};
use crate::models::{SurveyResponse, VenueType};

pub const COL_SONG: &str = "曲名";
pub const COL_VISITS: &str = "項目2";
pub const COL_AGE: &str = "年齢";
pub const COL_PREFECTURE: &str = "都道府県名";
pub const COL_GENDER: &str = "性別";

const KNOWN_COLUMNS: [&str; 5] = [COL_SONG, COL_VISITS, COL_AGE, COL_PREFECTURE, COL_GENDER];

/// The event a survey file belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurveyTarget {
    pub live_name: String,
    pub event_date: NaiveDate,
    pub venue: VenueType,
}

impl SurveyTarget {
    /// Every row is stamped with the event day, not the import time.
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        let text = format!("{}{}", self.event_date.format("%Y-%m-%d"), SURVEY_TIME_OF_DAY);
        DateTime::parse_from_rfc3339(&text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| Error::Parse(format!("created_at {text}: {e}")))
    }
}

/// Blank cells count as unanswered.
fn answered(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|s| !s.is_empty())
}

/// "3回目" → "3回"; no number or no answer → "1回".
pub fn normalize_visits(cell: Option<&str>) -> String {
    let n = answered(cell).and_then(first_number).unwrap_or(1);
    format!("{n}回")
}

/// "28" / "28歳" → "20代"; 60 and over → "60代以上"; otherwise "未回答".
pub fn normalize_age(cell: Option<&str>) -> String {
    match answered(cell).and_then(first_number) {
        Some(n) if n >= 60 => s!("60代以上"),
        Some(n) => format!("{}代", n / 10 * 10),
        None => s!(UNANSWERED),
    }
}

pub fn answer_or_unanswered(cell: Option<&str>) -> String {
    s!(answered(cell).unwrap_or(UNANSWERED))
}

pub fn read_table(path: &Path) -> Result<Table> {
    let bytes = fs::read(path)?;
    let (text, enc) = decode_bytes(&bytes)?;
    logd!("survey: {} decoded as {:?}", path.display(), enc);
    Table::from_text(&text, ',')
}

/// Reshape every data row. A file with none of the known columns is rejected.
pub fn to_responses(table: &Table, target: &SurveyTarget) -> Result<Vec<SurveyResponse>> {
    if !KNOWN_COLUMNS.iter().any(|c| table.has_column(c)) {
        return Err(Error::Csv(format!(
            "none of the expected columns ({}) found; got {:?}",
            KNOWN_COLUMNS.join(", "),
            table.headers
        )));
    }
    for c in KNOWN_COLUMNS.iter().filter(|c| !table.has_column(c)) {
        logw!("survey: column {c} missing, rows will read {UNANSWERED}");
    }

    let created_at = target.created_at()?;
    let event_year = target.event_date.year();

    Ok(table
        .rows
        .iter()
        .map(|row| SurveyResponse {
            live_name: target.live_name.clone(),
            venue_type: target.venue,
            event_year,
            request_song: answer_or_unanswered(table.get(row, COL_SONG)),
            visits: normalize_visits(table.get(row, COL_VISITS)),
            prefecture: answer_or_unanswered(table.get(row, COL_PREFECTURE)),
            age: normalize_age(table.get(row, COL_AGE)),
            gender: answer_or_unanswered(table.get(row, COL_GENDER)),
            created_at,
        })
        .collect())
}

pub fn load(path: &Path, target: &SurveyTarget) -> Result<Vec<SurveyResponse>> {
    to_responses(&read_table(path)?, target)
}
