// src/gui/components/tabs.rs
//
// Top tabs plus the refresh control. Switching tabs never reloads; data is shared.

use eframe::egui::{self, widgets::Spinner};

use crate::gui::{app::App, router};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.current_index();
        for (idx, page) in router::all_pages().iter().enumerate() {
            let selected = idx == cur;
            if ui.selectable_label(selected, page.title()).clicked() && !selected {
                logf!("UI: Tab switch {:?} → {:?}", app.current_page().kind(), page.kind());
                app.set_current_index(idx);
            }
        }

        ui.separator();

        let loading = app.is_loading();
        if ui.add_enabled(!loading, egui::Button::new("Refresh")).clicked() {
            app.reload(true);
        }
        if loading {
            ui.add(Spinner::new());
        }
        ui.weak(app.status());
    });
}
