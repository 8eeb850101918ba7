// src/gui/pages/videos.rs
use eframe::egui;

use super::{grouped, Page, PageCtx, PageKind};
use crate::{
    config::consts::RANKING_TOP_N,
    dashboard::views::{self, GrowthRow, RankRow},
    gui::components::{bar_chart, data_table::{self, TableSpec}},
};

pub struct VideosPage;
pub static PAGE: VideosPage = VideosPage;

const RANK_HEADERS: [&str; 4] = ["#", "Title", "Views", "Published"];
const GROWTH_HEADERS: [&str; 3] = ["Date", "Views", "Increase"];

pub fn ranking_rows(rows: &[RankRow]) -> Vec<Vec<String>> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| vec![
            (i + 1).to_string(),
            r.title.clone(),
            grouped(r.views),
            r.published_at.map(|d| d.to_string()).unwrap_or_default(),
        ])
        .collect()
}

pub fn ranking_bars(rows: &[RankRow]) -> Vec<(String, f64)> {
    rows.iter().take(RANKING_TOP_N).map(|r| (r.title.clone(), r.views as f64)).collect()
}

pub fn growth_rows(rows: &[GrowthRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|g| vec![g.date.to_string(), grouped(g.views), format!("+{}", grouped(g.increase))])
        .collect()
}

impl Page for VideosPage {
    fn title(&self) -> &'static str { "Videos" }
    fn kind(&self) -> PageKind { PageKind::Videos }

    fn draw(&self, ui: &mut egui::Ui, ctx: &mut PageCtx) {
        if let Some(msg) = ctx.snap.videos.empty_message("video stats") {
            ui.heading("MV ranking");
            data_table::empty_state(ui, &msg);
            return;
        }

        let stats = &ctx.snap.videos.rows;
        let ranking = views::video_ranking(stats);

        let mut chosen = ctx.view.growth_video.clone()
            .filter(|id| ranking.iter().any(|r| &r.video_id == id))
            .or_else(|| ranking.first().map(|r| r.video_id.clone()));

        ui.columns(2, |cols| {
            let left = &mut cols[0];
            left.heading("MV ranking");
            bar_chart::draw(left, &ranking_bars(&ranking));
            left.separator();
            let spec = TableSpec { id: "mv_ranking", headers: &RANK_HEADERS, numeric: &[0, 2], max_height: 320.0 };
            data_table::draw(left, &spec, &ranking_rows(&ranking));

            let right = &mut cols[1];
            right.heading("Daily growth");
            let shown = chosen.as_ref()
                .and_then(|id| ranking.iter().find(|r| &r.video_id == id))
                .map(|r| r.title.clone())
                .unwrap_or_else(|| s!("-"));
            egui::ComboBox::from_id_salt("growth_video")
                .selected_text(shown)
                .width(260.0)
                .show_ui(right, |ui| {
                    for r in &ranking {
                        ui.selectable_value(&mut chosen, Some(r.video_id.clone()), &r.title);
                    }
                });

            if let Some(id) = &chosen {
                let growth = views::daily_growth(stats, id);
                let bars: Vec<(String, f64)> = growth
                    .iter()
                    .skip(1)
                    .map(|g| (g.date.format("%m/%d").to_string(), g.increase as f64))
                    .collect();
                bar_chart::draw(right, &bars);
                right.separator();
                let spec = TableSpec { id: "mv_growth", headers: &GROWTH_HEADERS, numeric: &[1, 2], max_height: 320.0 };
                data_table::draw(right, &spec, &growth_rows(&growth));
            }
        });

        ctx.view.growth_video = chosen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rank(id: &str, views: u64) -> RankRow {
        RankRow { video_id: s!(id), title: format!("MV {id}"), views, published_at: NaiveDate::from_ymd_opt(2020, 1, 1) }
    }

    #[test]
    fn ranking_rows_are_numbered() {
        let rows = ranking_rows(&[rank("a", 2_000_000), rank("b", 10)]);
        assert_eq!(rows[0], vec![s!("1"), s!("MV a"), s!("2,000,000"), s!("2020-01-01")]);
        assert_eq!(rows[1][0], "2");
    }

    #[test]
    fn chart_stops_at_top_n() {
        let many: Vec<_> = (0..25).map(|i| rank(&i.to_string(), 100 - i)).collect();
        assert_eq!(ranking_bars(&many).len(), RANKING_TOP_N);
    }

    #[test]
    fn growth_rows_format_increase() {
        let g = GrowthRow { date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), views: 1500, increase: 500 };
        assert_eq!(growth_rows(&[g]), vec![vec![s!("2026-01-02"), s!("1,500"), s!("+500")]]);
    }
}
