use std::f32::consts::PI;

use eframe::egui::{self, pos2, vec2, Align2, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui};

use crate::color::{band_color, correlation_color, correlation_text_color, NEUTRAL};
use crate::view::correlation::CorrelationMatrix;
use crate::view::gauge::GaugeReading;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const LABEL_SPACE: f32 = 110.0;

/// Square grid of every column pair, shaded by coefficient.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No correlations available.");
        });
        return;
    }

    let columns = matrix.columns();
    let n = columns.len() as f32;
    let cell = ((ui.available_width() - LABEL_SPACE) / n).clamp(28.0, 80.0);
    let side = LABEL_SPACE + cell * n;

    egui::ScrollArea::both().show(ui, |ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(vec2(side, side), Sense::hover());
        let origin = response.rect.min;
        let text_color = ui.visuals().text_color();
        let label_font = FontId::proportional(12.0);

        for (i, (row, values)) in columns.iter().zip(matrix.grid()).enumerate() {
            let offset = LABEL_SPACE + (i as f32 + 0.5) * cell;
            painter.text(
                origin + vec2(LABEL_SPACE - 6.0, offset),
                Align2::RIGHT_CENTER,
                short_label(row),
                label_font.clone(),
                text_color,
            );
            painter.text(
                origin + vec2(offset, LABEL_SPACE - 6.0),
                Align2::CENTER_BOTTOM,
                short_label(row),
                label_font.clone(),
                text_color,
            );

            for (j, value) in values.into_iter().enumerate() {
                let min = origin + vec2(LABEL_SPACE + j as f32 * cell, LABEL_SPACE + i as f32 * cell);
                let rect = Rect::from_min_size(min, vec2(cell, cell)).shrink(1.0);
                painter.rect_filled(rect, 2.0, NEUTRAL);
                painter.rect_filled(rect, 2.0, correlation_color(value));
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format!("{value:.2}"),
                    FontId::monospace(10.0),
                    correlation_text_color(value),
                );
            }
        }

        if let Some(pos) = response.hover_pos() {
            let local = pos - origin - vec2(LABEL_SPACE, LABEL_SPACE);
            if local.x >= 0.0 && local.y >= 0.0 {
                let (i, j) = ((local.y / cell) as usize, (local.x / cell) as usize);
                if let (Some(row), Some(col)) = (columns.get(i), columns.get(j)) {
                    let text = match matrix.get(row, col) {
                        Some(v) => format!("{row} × {col}: {v:.3}"),
                        None => format!("{row} × {col}: no data"),
                    };
                    response.on_hover_text(text);
                }
            }
        }
    });
}

fn short_label(name: &str) -> String {
    const MAX: usize = 12;
    if name.chars().count() <= MAX {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Quality gauge
// ---------------------------------------------------------------------------

const GAUGE_RADIUS: f32 = 90.0;
const GAUGE_WIDTH: f32 = 14.0;

/// Half-circle gauge filled clockwise from the left in the band colour.
pub fn quality_gauge(ui: &mut Ui, reading: &GaugeReading) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(12.0);
        ui.heading("Data quality");

        let size = vec2(2.0 * GAUGE_RADIUS + 2.0 * GAUGE_WIDTH, GAUGE_RADIUS + 2.0 * GAUGE_WIDTH);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        let center = pos2(rect.center().x, rect.bottom() - GAUGE_WIDTH);
        let color = band_color(reading.band);

        painter.add(Shape::line(
            arc_points(center, GAUGE_RADIUS, 1.0),
            Stroke::new(GAUGE_WIDTH, ui.visuals().faint_bg_color),
        ));
        if reading.sweep_fraction > 0.0 {
            painter.add(Shape::line(
                arc_points(center, GAUGE_RADIUS, reading.sweep_fraction),
                Stroke::new(GAUGE_WIDTH, color),
            ));
        }
        painter.text(
            center - vec2(0.0, 28.0),
            Align2::CENTER_CENTER,
            format!("{}%", reading.score),
            FontId::proportional(28.0),
            ui.visuals().strong_text_color(),
        );

        ui.label(RichText::new(reading.band.to_string()).color(color).strong());
    });
}

/// Points along the upper half circle, from the left end through `fraction`
/// of the arc.
fn arc_points(center: Pos2, radius: f32, fraction: f32) -> Vec<Pos2> {
    const STEPS: usize = 64;
    let fraction = fraction.clamp(0.0, 1.0);
    (0..=STEPS)
        .map(|i| {
            let t = fraction * i as f32 / STEPS as f32;
            let angle = PI * (1.0 - t);
            pos2(center.x + radius * angle.cos(), center.y - radius * angle.sin())
        })
        .collect()
}
