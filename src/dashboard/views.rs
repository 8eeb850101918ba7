// src/dashboard/views.rs
//
// Pure shaping of loaded rows into what the pages and the snapshot report show.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{MetricSample, ScheduleEvent, SurveyResponse, VenueType, VideoStat};

/// Newest row per key: sort by timestamp descending, keep the first of each key.
/// Output is newest first.
pub fn latest_per_key<'a, T, K, FK, FT>(rows: &'a [T], key: FK, ts: FT) -> Vec<&'a T>
where
    K: Eq + Hash,
    FK: Fn(&T) -> K,
    FT: Fn(&T) -> DateTime<Utc>,
{
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(ts(*r)));
    let mut seen = HashSet::new();
    sorted.into_iter().filter(|r| seen.insert(key(*r))).collect()
}

/* ---------------- Videos ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankRow {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    pub published_at: Option<NaiveDate>,
}

/// Latest views per video, most viewed first.
pub fn video_ranking(stats: &[VideoStat]) -> Vec<RankRow> {
    let mut rows: Vec<RankRow> = latest_per_key(stats, |s| s.video_id.clone(), |s| s.created_at)
        .into_iter()
        .map(|s| RankRow {
            video_id: s.video_id.clone(),
            title: s.title.clone(),
            views: s.views,
            published_at: s.published_at,
        })
        .collect();
    rows.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.title.cmp(&b.title)));
    rows
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthRow {
    pub date: NaiveDate,
    pub views: u64,
    /// Views gained since the previous captured day; never negative
    pub increase: u64,
}

/// One row per capture day (last sample of the day), oldest first.
pub fn daily_growth(stats: &[VideoStat], video_id: &str) -> Vec<GrowthRow> {
    let mut last_of_day: BTreeMap<NaiveDate, &VideoStat> = BTreeMap::new();
    for s in stats.iter().filter(|s| s.video_id == video_id) {
        let day = s.created_at.date_naive();
        match last_of_day.get(&day) {
            Some(prev) if prev.created_at >= s.created_at => {}
            _ => { last_of_day.insert(day, s); }
        }
    }

    let mut prev: Option<u64> = None;
    last_of_day
        .into_iter()
        .map(|(date, s)| {
            let increase = prev.map_or(0, |p| s.views.saturating_sub(p));
            prev = Some(s.views);
            GrowthRow { date, views: s.views, increase }
        })
        .collect()
}

/* ---------------- SNS ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnsRow {
    pub platform: String,
    pub followers: u64,
    /// Change vs. the previous sample of the same platform
    pub diff: Option<i64>,
    pub at: DateTime<Utc>,
}

/// Latest count per platform with its change since the sample before it.
pub fn sns_latest(samples: &[MetricSample]) -> Vec<SnsRow> {
    let mut by_platform: HashMap<&str, Vec<&MetricSample>> = HashMap::new();
    for s in samples {
        by_platform.entry(s.platform.as_str()).or_default().push(s);
    }

    let mut rows: Vec<SnsRow> = by_platform
        .into_iter()
        .map(|(platform, mut v)| {
            v.sort_by_key(|s| std::cmp::Reverse(s.created_at));
            let latest = v[0];
            let diff = v.get(1).map(|p| latest.follower_count as i64 - p.follower_count as i64);
            SnsRow { platform: s!(platform), followers: latest.follower_count, diff, at: latest.created_at }
        })
        .collect();
    rows.sort_by(|a, b| a.platform.cmp(&b.platform));
    rows
}

/// Count history for one platform, oldest first.
pub fn sns_history<'a>(samples: &'a [MetricSample], platform: &str) -> Vec<&'a MetricSample> {
    let mut v: Vec<_> = samples.iter().filter(|s| s.platform == platform).collect();
    v.sort_by_key(|s| s.created_at);
    v
}

/* ---------------- Schedule ---------------- */

pub fn schedule_sorted(events: &[ScheduleEvent]) -> Vec<&ScheduleEvent> {
    let mut v: Vec<_> = events.iter().collect();
    v.sort_by(|a, b| a.event_date.cmp(&b.event_date).then_with(|| a.title.cmp(&b.title)));
    v
}

/// Events on or after `today`, soonest first.
pub fn upcoming(events: &[ScheduleEvent], today: NaiveDate) -> Vec<&ScheduleEvent> {
    schedule_sorted(events).into_iter().filter(|e| e.event_date >= today).collect()
}

/* ---------------- Survey ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurveyField {
    RequestSong,
    Visits,
    Prefecture,
    Age,
    Gender,
}

impl SurveyField {
    pub const ALL: [SurveyField; 5] =
        [Self::RequestSong, Self::Visits, Self::Prefecture, Self::Age, Self::Gender];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RequestSong => "Request song",
            Self::Visits => "Visits",
            Self::Prefecture => "Prefecture",
            Self::Age => "Age",
            Self::Gender => "Gender",
        }
    }

    pub fn get<'a>(&self, r: &'a SurveyResponse) -> &'a str {
        match self {
            Self::RequestSong => &r.request_song,
            Self::Visits => &r.visits,
            Self::Prefecture => &r.prefecture,
            Self::Age => &r.age,
            Self::Gender => &r.gender,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurveyFilter {
    pub year: Option<i32>,
    pub venue: Option<VenueType>,
    pub live: Option<String>,
}

impl SurveyFilter {
    pub fn accepts(&self, r: &SurveyResponse) -> bool {
        self.year.is_none_or(|y| r.event_year == y)
            && self.venue.is_none_or(|v| r.venue_type == v)
            && self.live.as_deref().is_none_or(|l| r.live_name == l)
    }

    pub fn apply<'a>(&self, rows: &'a [SurveyResponse]) -> Vec<&'a SurveyResponse> {
        rows.iter().filter(|r| self.accepts(r)).collect()
    }
}

/// Answer counts for one field, most common first (ties by label).
pub fn survey_counts(rows: &[&SurveyResponse], field: SurveyField) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(field.get(r)).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().map(|(k, n)| (s!(k), n)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Distinct years present, newest first.
pub fn survey_years(rows: &[SurveyResponse]) -> Vec<i32> {
    let mut y: Vec<i32> = rows.iter().map(|r| r.event_year).collect::<HashSet<_>>().into_iter().collect();
    y.sort_unstable_by(|a, b| b.cmp(a));
    y
}

/// Distinct live names, optionally restricted to one year, sorted.
pub fn survey_lives(rows: &[SurveyResponse], year: Option<i32>) -> Vec<String> {
    let mut v: Vec<String> = rows
        .iter()
        .filter(|r| year.is_none_or(|y| r.event_year == y))
        .map(|r| r.live_name.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    v.sort();
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, h, 0, 0).unwrap()
    }

    fn vs(id: &str, views: u64, t: DateTime<Utc>) -> VideoStat {
        VideoStat { title: format!("『{id}』"), views, video_id: s!(id), published_at: None, created_at: t }
    }

    fn ms(p: &str, n: u64, t: DateTime<Utc>) -> MetricSample {
        MetricSample { platform: s!(p), follower_count: n, created_at: t }
    }

    #[test]
    fn latest_wins_regardless_of_input_order() {
        let rows = [ms("x", 10, at(2, 0)), ms("x", 5, at(1, 0)), ms("yt", 1, at(1, 0))];
        let latest = latest_per_key(&rows, |r| r.platform.clone(), |r| r.created_at);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].follower_count, 10);
    }

    #[test]
    fn ranking_uses_latest_sample() {
        let stats = [vs("a", 100, at(1, 0)), vs("a", 150, at(2, 0)), vs("b", 120, at(2, 0))];
        let r = video_ranking(&stats);
        assert_eq!(r.iter().map(|x| (x.video_id.as_str(), x.views)).collect::<Vec<_>>(), vec![("a", 150), ("b", 120)]);
    }

    #[test]
    fn growth_is_per_day_and_clipped() {
        let stats = [
            vs("a", 100, at(1, 8)),
            vs("a", 110, at(1, 20)),
            vs("a", 105, at(2, 8)), // counter went down
            vs("a", 130, at(3, 8)),
            vs("b", 999, at(3, 8)),
        ];
        let g = daily_growth(&stats, "a");
        assert_eq!(g.iter().map(|r| (r.views, r.increase)).collect::<Vec<_>>(), vec![(110, 0), (105, 0), (130, 25)]);
    }

    #[test]
    fn sns_diff_vs_previous() {
        let rows = [ms("x", 100, at(1, 0)), ms("x", 130, at(2, 0)), ms("tiktok", 5, at(1, 0))];
        let s = sns_latest(&rows);
        assert_eq!(s[0].platform, "tiktok");
        assert_eq!(s[0].diff, None);
        assert_eq!((s[1].followers, s[1].diff), (130, Some(30)));
    }

    fn sr(live: &str, year: i32, venue: VenueType, song: &str) -> SurveyResponse {
        SurveyResponse {
            live_name: s!(live),
            venue_type: venue,
            event_year: year,
            request_song: s!(song),
            visits: s!("1回"),
            prefecture: s!("東京都"),
            age: s!("20代"),
            gender: s!("女性"),
            created_at: at(1, 9),
        }
    }

    #[test]
    fn survey_filter_and_counts() {
        let rows = [
            sr("A", 2025, VenueType::Arena, "IMPACT"),
            sr("A", 2025, VenueType::Arena, "IMPACT"),
            sr("A", 2025, VenueType::Arena, "Roots"),
            sr("B", 2026, VenueType::Hall, "IMPACT"),
        ];
        let f = SurveyFilter { year: Some(2025), ..Default::default() };
        let picked = f.apply(&rows);
        assert_eq!(survey_counts(&picked, SurveyField::RequestSong), vec![(s!("IMPACT"), 2), (s!("Roots"), 1)]);

        let f = SurveyFilter { venue: Some(VenueType::Hall), live: Some(s!("B")), ..Default::default() };
        assert_eq!(f.apply(&rows).len(), 1);

        assert_eq!(survey_years(&rows), vec![2026, 2025]);
        assert_eq!(survey_lives(&rows, Some(2026)), vec![s!("B")]);
    }

    #[test]
    fn schedule_ascending_and_upcoming() {
        let ev = |d: u32, t: &str| ScheduleEvent {
            event_date: NaiveDate::from_ymd_opt(2026, 3, d).unwrap(),
            category: crate::models::Category::Live,
            title: s!(t),
            description: s!(),
        };
        let events = [ev(9, "b"), ev(1, "a"), ev(5, "c")];
        let sorted: Vec<_> = schedule_sorted(&events).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(sorted, vec!["a", "c", "b"]);
        let up = upcoming(&events, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(up.len(), 2);
    }
}
