// src/gui/pages/survey.rs
use eframe::egui;

use super::{Page, PageCtx, PageKind};
use crate::{
    dashboard::views::{self, SurveyField, SurveyFilter},
    gui::components::{bar_chart, data_table::{self, TableSpec}},
    models::{SurveyResponse, VenueType},
};

pub struct SurveyPage;
pub static PAGE: SurveyPage = SurveyPage;

const HEADERS: [&str; 3] = ["Answer", "Count", "Share"];
const CHART_TOP_N: usize = 15;

pub fn count_rows(counts: &[(String, usize)], total: usize) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|(answer, n)| {
            let share = if total == 0 { 0.0 } else { *n as f64 * 100.0 / total as f64 };
            vec![answer.clone(), n.to_string(), format!("{share:.1}%")]
        })
        .collect()
}

/// Drop a live selection that the current year no longer offers.
fn settle(filter: &mut SurveyFilter, rows: &[SurveyResponse]) -> Vec<String> {
    let lives = views::survey_lives(rows, filter.year);
    if filter.live.as_ref().is_some_and(|l| !lives.contains(l)) {
        filter.live = None;
    }
    lives
}

fn filter_bar(ui: &mut egui::Ui, filter: &mut SurveyFilter, years: &[i32], lives: &[String]) {
    ui.horizontal_wrapped(|ui| {
        ui.label("Year:");
        egui::ComboBox::from_id_salt("survey_year")
            .selected_text(filter.year.map(|y| y.to_string()).unwrap_or_else(|| s!("All")))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.year, None, "All");
                for y in years {
                    ui.selectable_value(&mut filter.year, Some(*y), y.to_string());
                }
            });

        ui.label("Venue:");
        egui::ComboBox::from_id_salt("survey_venue")
            .selected_text(filter.venue.map(|v| s!(v.as_str())).unwrap_or_else(|| s!("All")))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.venue, None, "All");
                for v in VenueType::ALL {
                    ui.selectable_value(&mut filter.venue, Some(v), v.as_str());
                }
            });

        ui.label("Live:");
        egui::ComboBox::from_id_salt("survey_live")
            .selected_text(filter.live.clone().unwrap_or_else(|| s!("All")))
            .width(240.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.live, None, "All");
                for l in lives {
                    ui.selectable_value(&mut filter.live, Some(l.clone()), l);
                }
            });
    });
}

impl Page for SurveyPage {
    fn title(&self) -> &'static str { "Survey" }
    fn kind(&self) -> PageKind { PageKind::Survey }

    fn draw(&self, ui: &mut egui::Ui, ctx: &mut PageCtx) {
        ui.heading("Survey analysis");
        if let Some(msg) = ctx.snap.surveys.empty_message("survey responses") {
            data_table::empty_state(ui, &msg);
            return;
        }

        let all = &ctx.snap.surveys.rows;
        let years = views::survey_years(all);
        let lives = settle(&mut ctx.view.survey_filter, all);
        filter_bar(ui, &mut ctx.view.survey_filter, &years, &lives);

        ui.horizontal(|ui| {
            ui.label("Field:");
            for f in SurveyField::ALL {
                ui.selectable_value(&mut ctx.view.survey_field, f, f.label());
            }
        });
        ui.separator();

        let picked = ctx.view.survey_filter.apply(all);
        if picked.is_empty() {
            data_table::empty_state(ui, "No responses match the filters.");
            return;
        }
        let counts = views::survey_counts(&picked, ctx.view.survey_field);
        ui.weak(format!("{} response(s), {} distinct answer(s)", picked.len(), counts.len()));

        let bars: Vec<(String, f64)> = counts.iter().take(CHART_TOP_N).map(|(k, n)| (k.clone(), *n as f64)).collect();
        bar_chart::draw(ui, &bars);
        ui.separator();

        let spec = TableSpec { id: "survey_counts", headers: &HEADERS, numeric: &[1, 2], max_height: ui.available_height() };
        data_table::draw(ui, &spec, &count_rows(&counts, picked.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resp(live: &str, year: i32) -> SurveyResponse {
        SurveyResponse {
            live_name: s!(live),
            venue_type: VenueType::Hall,
            event_year: year,
            request_song: s!("7th Trigger"),
            visits: s!("初めて"),
            prefecture: s!("東京都"),
            age: s!("20代"),
            gender: s!("女性"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn shares_are_percent_of_total() {
        let rows = count_rows(&[(s!("A"), 3), (s!("B"), 1)], 4);
        assert_eq!(rows[0], vec![s!("A"), s!("3"), s!("75.0%")]);
        assert_eq!(rows[1][2], "25.0%");
        assert_eq!(count_rows(&[(s!("A"), 0)], 0)[0][2], "0.0%");
    }

    #[test]
    fn live_selection_is_dropped_when_the_year_changes() {
        let rows = vec![resp("TOUR 2024", 2024), resp("TOUR 2025", 2025)];
        let mut f = SurveyFilter { year: Some(2025), venue: None, live: Some(s!("TOUR 2024")) };
        let lives = settle(&mut f, &rows);
        assert_eq!(lives, vec![s!("TOUR 2025")]);
        assert_eq!(f.live, None);

        f.live = Some(s!("TOUR 2025"));
        settle(&mut f, &rows);
        assert_eq!(f.live.as_deref(), Some("TOUR 2025"));
    }
}
