// src/dashboard/snapshot.rs
//
// Plain-text dashboard for the terminal: one TSV block per view.

use std::io::{self, Write};

use chrono::NaiveDate;

use super::views::{self, SurveyField, SurveyFilter};
use super::Snapshot;
use crate::config::consts::RANKING_TOP_N;
use crate::core::csv::write_row;

const SURVEY_TOP_N: usize = 5;

fn section<W: Write>(w: &mut W, title: &str, empty: Option<String>) -> io::Result<bool> {
    writeln!(w, "\n== {title} ==")?;
    if let Some(msg) = empty {
        writeln!(w, "{msg}")?;
        return Ok(false);
    }
    Ok(true)
}

pub(crate) fn signed(d: Option<i64>) -> String {
    match d {
        Some(d) if d > 0 => format!("+{d}"),
        Some(d) => d.to_string(),
        None => s!("-"),
    }
}

pub fn write_report<W: Write>(w: &mut W, snap: &Snapshot, today: NaiveDate) -> io::Result<()> {
    if section(w, "Followers", snap.sns.empty_message("follower samples"))? {
        write_row(&mut *w, &cols!["Platform", "Followers", "Change", "Sampled at"], '\t')?;
        for r in views::sns_latest(&snap.sns.rows) {
            let at = r.at.format("%Y-%m-%d %H:%M").to_string();
            write_row(&mut *w, &[r.platform, r.followers.to_string(), signed(r.diff), at], '\t')?;
        }
    }

    if section(w, "MV ranking", snap.videos.empty_message("video stats"))? {
        write_row(&mut *w, &cols!["#", "Title", "Views", "Published"], '\t')?;
        for (i, r) in views::video_ranking(&snap.videos.rows).into_iter().take(RANKING_TOP_N).enumerate() {
            let published = r.published_at.map(|d| d.to_string()).unwrap_or_default();
            write_row(&mut *w, &[(i + 1).to_string(), r.title, r.views.to_string(), published], '\t')?;
        }
    }

    if section(w, "Upcoming", snap.schedule.empty_message("schedule events"))? {
        write_row(&mut *w, &cols!["Date", "Category", "Title"], '\t')?;
        for e in views::upcoming(&snap.schedule.rows, today) {
            write_row(&mut *w, &[e.event_date.to_string(), s!(e.category.as_str()), e.title.clone()], '\t')?;
        }
    }

    if section(w, "Survey", snap.surveys.empty_message("survey responses"))? {
        let all = SurveyFilter::default().apply(&snap.surveys.rows);
        writeln!(w, "{} response(s)", all.len())?;
        for field in SurveyField::ALL {
            let top: Vec<String> = views::survey_counts(&all, field)
                .into_iter()
                .take(SURVEY_TOP_N)
                .map(|(k, n)| format!("{k} ({n})"))
                .collect();
            write_row(&mut *w, &[s!(field.label()), top.join(", ")], '\t')?;
        }
    }
    Ok(())
}
