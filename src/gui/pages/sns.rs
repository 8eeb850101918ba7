// src/gui/pages/sns.rs
use eframe::egui;

use super::{grouped, Page, PageCtx, PageKind};
use crate::{
    dashboard::{snapshot::signed, views::{self, SnsRow}},
    gui::components::{bar_chart, data_table::{self, TableSpec}},
    models::MetricSample,
};

pub struct SnsPage;
pub static PAGE: SnsPage = SnsPage;

const HEADERS: [&str; 4] = ["Platform", "Followers", "Change", "Sampled at"];
const HISTORY_LEN: usize = 14;

pub fn latest_rows(rows: &[SnsRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| vec![
            r.platform.clone(),
            grouped(r.followers),
            signed(r.diff),
            r.at.format("%Y-%m-%d %H:%M").to_string(),
        ])
        .collect()
}

/// The last `n` samples of one platform, oldest first, labelled by capture time.
pub fn history_bars(samples: &[MetricSample], platform: &str, n: usize) -> Vec<(String, f64)> {
    let hist = views::sns_history(samples, platform);
    let skip = hist.len().saturating_sub(n);
    hist.into_iter()
        .skip(skip)
        .map(|s| (s.created_at.format("%m/%d %H:%M").to_string(), s.follower_count as f64))
        .collect()
}

impl Page for SnsPage {
    fn title(&self) -> &'static str { "SNS" }
    fn kind(&self) -> PageKind { PageKind::Sns }

    fn draw(&self, ui: &mut egui::Ui, ctx: &mut PageCtx) {
        ui.heading("Followers");
        if let Some(msg) = ctx.snap.sns.empty_message("follower samples") {
            data_table::empty_state(ui, &msg);
            return;
        }

        let latest = views::sns_latest(&ctx.snap.sns.rows);
        let spec = TableSpec { id: "sns_latest", headers: &HEADERS, numeric: &[1, 2], max_height: 180.0 };
        data_table::draw(ui, &spec, &latest_rows(&latest));

        ui.separator();

        let platforms: Vec<&str> = latest.iter().map(|r| r.platform.as_str()).collect();
        let mut chosen = ctx.view.sns_platform.clone()
            .filter(|p| platforms.contains(&p.as_str()))
            .or_else(|| platforms.first().map(|p| s!(*p)));
        let shown = chosen.clone().unwrap_or_else(|| s!("-"));

        ui.horizontal(|ui| {
            ui.label("History:");
            egui::ComboBox::from_id_salt("sns_platform")
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    for p in &platforms {
                        ui.selectable_value(&mut chosen, Some(s!(*p)), *p);
                    }
                });
        });

        if let Some(p) = &chosen {
            bar_chart::draw(ui, &history_bars(&ctx.snap.sns.rows, p, HISTORY_LEN));
        }
        ctx.view.sns_platform = chosen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(platform: &str, n: u64, day: u32) -> MetricSample {
        MetricSample {
            platform: s!(platform),
            follower_count: n,
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn latest_rows_show_change_with_sign() {
        let rows = latest_rows(&views::sns_latest(&[sample("tiktok", 1500, 1), sample("tiktok", 1200, 2)]));
        assert_eq!(rows, vec![vec![s!("tiktok"), s!("1,200"), s!("-300"), s!("2026-03-02 09:00")]]);
    }

    #[test]
    fn history_keeps_the_most_recent_samples() {
        let samples: Vec<_> = (1..=5).map(|d| sample("x", d as u64 * 10, d)).collect();
        let bars = history_bars(&samples, "x", 2);
        assert_eq!(bars, vec![(s!("03/04 09:00"), 40.0), (s!("03/05 09:00"), 50.0)]);
        assert!(history_bars(&samples, "instagram", 2).is_empty());
    }
}
