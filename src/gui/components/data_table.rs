// src/gui/components/data_table.rs
//
// Read-only table over already-formatted rows. Purely a view.

use eframe::egui::{self, Align, Layout, RichText};
use egui_extras::{Column, TableBuilder};

pub struct TableSpec<'a> {
    /// Distinguishes tables that share a page
    pub id: &'a str,
    pub headers: &'a [&'a str],
    /// Column indexes drawn right-aligned
    pub numeric: &'a [usize],
    pub max_height: f32,
}

pub fn draw(ui: &mut egui::Ui, spec: &TableSpec, rows: &[Vec<String>]) {
    let cols = spec.headers.len();
    let mut table = TableBuilder::new(ui)
        .id_salt(spec.id)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(spec.max_height)
        .cell_layout(Layout::left_to_right(Align::Center));

    for ci in 0..cols {
        let col = if ci + 1 == cols {
            Column::remainder().at_least(60.0).clip(true)
        } else if spec.numeric.contains(&ci) {
            Column::initial(90.0).at_least(40.0)
        } else {
            Column::initial(160.0).at_least(40.0).clip(true)
        };
        table = table.column(col);
    }

    table
        .header(22.0, |mut header| {
            for h in spec.headers {
                header.col(|ui| {
                    ui.label(RichText::new(*h).strong());
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for ci in 0..cols {
                    let text = cells.get(ci).map(String::as_str).unwrap_or("");
                    row.col(|ui| {
                        if spec.numeric.contains(&ci) {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(text);
                            });
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}

/// Placeholder shown instead of a table that has nothing to show.
pub fn empty_state(ui: &mut egui::Ui, msg: &str) {
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.weak(msg);
    });
    ui.add_space(12.0);
}
