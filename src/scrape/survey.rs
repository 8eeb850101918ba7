// src/scrape/survey.rs
use std::io::{BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::{
    config::{consts::EVENT_PICK_LIMIT, options::Pacing},
    error::{Error, Result},
    ingest::{run_batch, BatchReport},
    models::{Category, Record, ScheduleEvent, SurveyResponse, VenueType},
    progress::Progress,
    reconcile::{reconcile_records, Policy},
    specs::survey::{self, SurveyTarget},
    store::{select_as, Filter, Query, Store},
};

/// Which existing rows one import replaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurveyKey {
    /// live_name + event_year: one import per live per year
    #[default]
    NameYear,
    /// live_name + the event day of created_at: one import per show date
    NameDate,
}

impl SurveyKey {
    pub fn filters(&self, t: &SurveyTarget) -> Vec<Filter> {
        let name = Filter::eq("live_name", &t.live_name);
        match self {
            Self::NameYear => {
                vec![name, Filter::eq("event_year", chrono::Datelike::year(&t.event_date))]
            }
            Self::NameDate => {
                let day = t.event_date.format("%Y-%m-%d");
                vec![
                    name,
                    Filter::gte("created_at", format!("{day}T00:00:00")),
                    Filter::lte("created_at", format!("{day}T23:59:59")),
                ]
            }
        }
    }
}

/// Most recent LIVE events, newest first, for the operator to pick from.
pub fn recent_live_events(store: &dyn Store) -> Result<Vec<ScheduleEvent>> {
    let q = Query::new()
        .filter(Filter::eq("category", Category::Live))
        .order_desc("event_date")
        .limit(EVENT_PICK_LIMIT);
    select_as(store, &q)
}

fn read_index<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str, len: usize) -> Result<usize> {
    write!(out, "{prompt} [0-{}]: ", len.saturating_sub(1))?;
    out.flush()?;
    let mut line = s!();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Input(s!("no answer (end of input)")));
    }
    let n: usize = line
        .trim()
        .parse()
        .map_err(|_| Error::Input(format!("not a number: {:?}", line.trim())))?;
    if n >= len {
        return Err(Error::Input(format!("{n} is out of range")));
    }
    Ok(n)
}

/// Ask which event and venue type the file belongs to.
pub fn prompt_target<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    events: &[ScheduleEvent],
) -> Result<SurveyTarget> {
    if events.is_empty() {
        return Err(Error::Input(s!("no LIVE events in the calendar; run `schedule` first")));
    }
    writeln!(out, "Select the live this survey belongs to:")?;
    for (i, ev) in events.iter().enumerate() {
        writeln!(out, "[{i}] {} : {}", ev.event_date, ev.title)?;
    }
    let ev = &events[read_index(input, out, "Event", events.len())?];

    writeln!(out, "Select the venue type:")?;
    for (i, v) in VenueType::ALL.iter().enumerate() {
        writeln!(out, "[{i}] {v}")?;
    }
    let venue = VenueType::ALL[read_index(input, out, "Venue", VenueType::ALL.len())?];

    Ok(SurveyTarget { live_name: ev.title.clone(), event_date: ev.event_date, venue })
}

/// Non-interactive target: the caller already knows the event.
pub fn target_from(live_name: &str, event_date: NaiveDate, venue: VenueType) -> SurveyTarget {
    SurveyTarget { live_name: s!(live_name), event_date, venue }
}

/// Read `path`, reshape it and replace the event's rows in `survey_responses`.
pub fn import_survey(
    store: &dyn Store,
    path: &Path,
    target: &SurveyTarget,
    key: SurveyKey,
    progress: &mut dyn Progress,
) -> Result<BatchReport> {
    let policy = Policy::Replace { key: key.filters(target) };
    let label = format!("{} ({})", target.live_name, path.display());
    progress.log(&format!("Importing {} into {}…", path.display(), SurveyResponse::TABLE));

    run_batch(&[path], |_| label.clone(), &Pacing::none(), progress, |p| {
        let rows = survey::load(p, target)?;
        if rows.is_empty() {
            return Err(Error::NoMatch(format!("data rows in {}", p.display())));
        }
        logf!("survey: {} row(s) for {} / {} / {}", rows.len(), target.live_name, target.event_date, target.venue);
        reconcile_records(store, &policy, &rows)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn events() -> Vec<ScheduleEvent> {
        vec![
            ScheduleEvent {
                event_date: NaiveDate::from_ymd_opt(2026, 2, 13).unwrap(),
                category: Category::Live,
                title: s!("ARENA TOUR 東京"),
                description: s!(),
            },
            ScheduleEvent {
                event_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                category: Category::Live,
                title: s!("HALL TOUR 大阪"),
                description: s!(),
            },
        ]
    }

    #[test]
    fn prompt_picks_event_and_venue() {
        let mut input = Cursor::new("1\n2\n");
        let mut out = Vec::new();
        let t = prompt_target(&mut input, &mut out, &events()).unwrap();
        assert_eq!(t.live_name, "HALL TOUR 大阪");
        assert_eq!(t.venue, VenueType::Arena);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("[0] 2026-02-13 : ARENA TOUR 東京"));
        assert!(shown.contains("[0] LIVE HOUSE"));
    }

    #[test]
    fn prompt_rejects_bad_answers() {
        let mut out = Vec::new();
        assert!(matches!(prompt_target(&mut Cursor::new("x\n"), &mut out, &events()), Err(Error::Input(_))));
        assert!(matches!(prompt_target(&mut Cursor::new("5\n"), &mut out, &events()), Err(Error::Input(_))));
        assert!(matches!(prompt_target(&mut Cursor::new(""), &mut out, &events()), Err(Error::Input(_))));
        assert!(matches!(prompt_target(&mut Cursor::new("0\n"), &mut out, &[]), Err(Error::Input(_))));
    }

    #[test]
    fn key_filters() {
        let t = target_from("A", NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(), VenueType::Fes);
        assert_eq!(
            SurveyKey::NameYear.filters(&t),
            vec![Filter::eq("live_name", "A"), Filter::eq("event_year", 2025)]
        );
        let by_date = SurveyKey::NameDate.filters(&t);
        assert_eq!(by_date[1], Filter::gte("created_at", "2025-08-01T00:00:00"));
    }
}
