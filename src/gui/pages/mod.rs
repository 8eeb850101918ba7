// src/gui/pages/mod.rs
use chrono::NaiveDate;
use eframe::egui;

use crate::dashboard::{
    views::{SurveyField, SurveyFilter},
    Snapshot,
};

pub mod schedule;
pub mod sns;
pub mod survey;
pub mod videos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Sns,
    Videos,
    Schedule,
    Survey,
}

/// Selections that survive tab switches and refreshes.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub sns_platform: Option<String>,
    pub growth_video: Option<String>,
    pub upcoming_only: bool,
    pub survey_filter: SurveyFilter,
    pub survey_field: SurveyField,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sns_platform: None,
            growth_video: None,
            upcoming_only: true,
            survey_filter: SurveyFilter::default(),
            survey_field: SurveyField::RequestSong,
        }
    }
}

/// What a page gets to draw with. Data is read-only; only view state changes.
pub struct PageCtx<'a> {
    pub snap: &'a Snapshot,
    pub view: &'a mut ViewState,
    pub today: NaiveDate,
}

pub trait Page: Send + Sync + 'static {
    fn title(&self) -> &'static str;
    fn kind(&self) -> PageKind;

    /// Draw the whole page body below the tabs.
    fn draw(&self, ui: &mut egui::Ui, ctx: &mut PageCtx);
}

/// Thousands separators for counts shown in tables.
pub(crate) fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::grouped;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(12345678), "12,345,678");
    }
}
