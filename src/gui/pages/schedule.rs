// src/gui/pages/schedule.rs
use eframe::egui;

use super::{Page, PageCtx, PageKind};
use crate::{
    dashboard::views,
    gui::components::data_table::{self, TableSpec},
    models::ScheduleEvent,
};

pub struct SchedulePage;
pub static PAGE: SchedulePage = SchedulePage;

const HEADERS: [&str; 4] = ["Date", "Category", "Title", "Description"];

pub fn event_rows(events: &[&ScheduleEvent]) -> Vec<Vec<String>> {
    events
        .iter()
        .map(|e| vec![
            e.event_date.format("%Y-%m-%d (%a)").to_string(),
            s!(e.category.as_str()),
            e.title.clone(),
            e.description.clone(),
        ])
        .collect()
}

impl Page for SchedulePage {
    fn title(&self) -> &'static str { "Schedule" }
    fn kind(&self) -> PageKind { PageKind::Schedule }

    fn draw(&self, ui: &mut egui::Ui, ctx: &mut PageCtx) {
        ui.horizontal(|ui| {
            ui.heading("Schedule");
            ui.checkbox(&mut ctx.view.upcoming_only, "Upcoming only");
        });
        if let Some(msg) = ctx.snap.schedule.empty_message("schedule events") {
            data_table::empty_state(ui, &msg);
            return;
        }

        let events = if ctx.view.upcoming_only {
            views::upcoming(&ctx.snap.schedule.rows, ctx.today)
        } else {
            views::schedule_sorted(&ctx.snap.schedule.rows)
        };
        if events.is_empty() {
            data_table::empty_state(ui, "No upcoming events.");
            return;
        }

        ui.weak(format!("{} event(s)", events.len()));
        let spec = TableSpec { id: "schedule", headers: &HEADERS, numeric: &[], max_height: ui.available_height() };
        data_table::draw(ui, &spec, &event_rows(&events));
    }
}
