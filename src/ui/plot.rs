use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;
use crate::view::chart::{ChartKind, ChartSeries};

const SERIES_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Chart tab (central panel)
// ---------------------------------------------------------------------------

/// Chart controls plus the chart of the currently visible rows.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    let numeric = match &state.session {
        Some(session) => session.numeric_columns(state.settings.dataset),
        None => return,
    };

    if numeric.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No numeric columns to chart.");
        });
        return;
    }

    chart_controls(ui, state, &numeric);
    ui.separator();

    match &state.views.chart {
        Err(e) => {
            ui.label(RichText::new(format!("Cannot draw chart: {e}")).color(Color32::RED));
        }
        Ok(None) => {
            ui.label("No numeric columns to chart.");
        }
        Ok(Some(series)) if series.is_empty() => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No rows to chart for the current query.");
            });
        }
        Ok(Some(series)) => {
            let skipped = series.points.len() - series.xy().len();
            if skipped > 0 {
                ui.label(RichText::new(format!("{skipped} rows without a numeric value are not drawn")).weak());
            }
            draw_series(ui, series);
        }
    }
}

fn chart_controls(ui: &mut Ui, state: &mut AppState, numeric: &[String]) {
    let config = state.settings.chart.clone();
    let mut kind = config.kind;
    let mut primary = config.primary.clone().unwrap_or_default();
    let mut secondary = config.secondary.clone().unwrap_or_default();

    ui.horizontal(|ui: &mut Ui| {
        for k in ChartKind::ALL {
            ui.selectable_value(&mut kind, k, k.to_string());
        }

        ui.separator();

        let primary_label = if kind.needs_two_columns() { "X" } else { "Value" };
        ui.label(primary_label);
        egui::ComboBox::from_id_salt("chart_primary")
            .selected_text(&primary)
            .show_ui(ui, |ui: &mut Ui| {
                for column in numeric {
                    ui.selectable_value(&mut primary, column.clone(), column);
                }
            });

        if kind.needs_two_columns() {
            ui.label("Y");
            egui::ComboBox::from_id_salt("chart_secondary")
                .selected_text(&secondary)
                .show_ui(ui, |ui: &mut Ui| {
                    for column in numeric {
                        ui.selectable_value(&mut secondary, column.clone(), column);
                    }
                });
        }
    });

    if kind != config.kind {
        state.set_chart_kind(kind);
    }
    if config.primary.as_deref() != Some(primary.as_str()) && !primary.is_empty() {
        state.set_chart_primary(primary);
    }
    if config.secondary.as_deref() != Some(secondary.as_str()) && !secondary.is_empty() {
        state.set_chart_secondary(secondary);
    }
}

fn draw_series(ui: &mut Ui, series: &ChartSeries) {
    let points = series.xy();

    Plot::new("chart_plot")
        .legend(Legend::default())
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match series.kind {
            ChartKind::Bar => {
                let bars = points
                    .iter()
                    .map(|&[x, y]| Bar::new(x, y).width(0.8))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(&series.y_label));
            }
            ChartKind::Line => {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(SERIES_COLOR)
                        .width(1.5)
                        .name(&series.y_label),
                );
            }
            ChartKind::Scatter => {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(SERIES_COLOR)
                        .radius(3.0)
                        .name(format!("{} vs {}", series.y_label, series.x_label)),
                );
            }
        });
}
