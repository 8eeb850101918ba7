// src/gui/components/bar_chart.rs
//
// Horizontal bar chart painted straight onto the Ui: label | bar | value.

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Vec2};

const ROW_H: f32 = 20.0;
const LABEL_W: f32 = 180.0;
const VALUE_W: f32 = 80.0;

/// Bar lengths for `values` so the largest fills `width`. All zero if nothing is positive.
pub fn scale(values: &[f64], width: f32) -> Vec<f32> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| ((v.max(0.0) / max) as f32 * width).max(0.0))
        .collect()
}

fn clip_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s!(s);
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Draw one bar per `(label, value)`, in the given order.
pub fn draw(ui: &mut egui::Ui, bars: &[(String, f64)]) {
    if bars.is_empty() {
        ui.weak("Nothing to chart.");
        return;
    }

    let width = ui.available_width().max(LABEL_W + VALUE_W + 40.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, ROW_H * bars.len() as f32), Sense::hover());
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    let text_color = visuals.text_color();
    let fill = visuals.selection.bg_fill;
    let font = FontId::proportional(12.0);

    let bar_space = width - LABEL_W - VALUE_W;
    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).collect();
    let lengths = scale(&values, bar_space);

    for (i, ((label, value), len)) in bars.iter().zip(lengths).enumerate() {
        let top = rect.top() + i as f32 * ROW_H;
        let mid = top + ROW_H * 0.5;

        painter.text(
            Pos2::new(rect.left() + LABEL_W - 6.0, mid),
            Align2::RIGHT_CENTER,
            clip_label(label, 24),
            font.clone(),
            text_color,
        );

        let x0 = rect.left() + LABEL_W;
        let bar = Rect::from_min_size(Pos2::new(x0, top + 3.0), Vec2::new(len, ROW_H - 6.0));
        painter.rect_filled(bar, 2.0, fill);

        painter.text(
            Pos2::new(x0 + len + 6.0, mid),
            Align2::LEFT_CENTER,
            format_value(*value),
            font.clone(),
            text_color,
        );
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 { format!("{}", v as i64) } else { format!("{v:.1}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_bar_fills_width() {
        assert_eq!(scale(&[50.0, 100.0, 0.0], 200.0), vec![100.0, 200.0, 0.0]);
    }

    #[test]
    fn nothing_positive_means_no_bars() {
        assert_eq!(scale(&[0.0, -3.0], 200.0), vec![0.0, 0.0]);
        assert!(scale(&[], 10.0).is_empty());
    }

    #[test]
    fn long_labels_are_clipped() {
        assert_eq!(clip_label("abcdef", 4), "abc…");
        assert_eq!(clip_label("東京", 4), "東京");
        assert_eq!(format_value(12.0), "12");
    }
}
