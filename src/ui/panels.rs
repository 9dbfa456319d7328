use std::path::Path;
use std::time::Instant;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::session::DatasetKind;
use crate::state::{AppState, NoticeKind};

// ---------------------------------------------------------------------------
// Left side panel – query, notices and insights
// ---------------------------------------------------------------------------

/// Render the left query / insights panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Query");
    ui.separator();

    if state.session.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut query = state.settings.query.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("text, or Column>value")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_query(query);
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.horizontal(|ui: &mut Ui| {
        let ask = ui
            .add_enabled(state.can_delegate(), egui::Button::new("Ask translator"))
            .on_hover_text("Turn a plain-language question into a filter");
        if state.translation_in_flight() {
            ui.spinner();
        }
        if ask.clicked() || submitted {
            state.submit_query(Instant::now());
        }
    });

    if let Some(notice) = &state.notice {
        let color = match notice.kind {
            NoticeKind::Info => ui.visuals().weak_text_color(),
            NoticeKind::Warning => Color32::from_rgb(230, 160, 40),
        };
        ui.label(RichText::new(&notice.text).color(color).italics());
    }

    if let Some(sort) = state.settings.sort.clone() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("Sorted by {} {}", sort.column, sort.direction.arrow()));
            if ui.small_button("Clear").clicked() {
                state.settings.sort = None;
                state.recompute();
            }
        });
    }

    ui.separator();

    let Some(session) = &state.session else {
        return;
    };
    let insights = &session.insights;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::CollapsingHeader::new(RichText::new("Insights").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if !insights.summary.is_empty() {
                        ui.label(&insights.summary);
                        ui.add_space(4.0);
                    }
                    egui::Grid::new("insight_counts")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui: &mut Ui| {
                            let counts = [
                                ("Rows before cleaning", insights.rows_original),
                                ("Rows after cleaning", insights.rows_cleaned),
                                ("Duplicates removed", insights.duplicates_removed),
                                ("Anomalies detected", insights.anomalies_detected),
                                ("PII values masked", insights.pii_masked),
                            ];
                            for (label, count) in counts {
                                ui.label(label);
                                ui.monospace(count.to_string());
                                ui.end_row();
                            }
                            ui.label("Quality");
                            ui.monospace(format!("{}% ({})", session.gauge.score, session.gauge.band));
                            ui.end_row();
                        });
                    if !session.request_id.is_empty() {
                        ui.label(RichText::new(format!("run {}", session.request_id)).small().weak());
                    }
                });

            egui::CollapsingHeader::new(RichText::new("Columns").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for stat in &session.column_stats {
                        ui.label(RichText::new(&stat.name).strong());
                        let sample = if stat.sample_value.is_missing() {
                            "no values".to_string()
                        } else {
                            format!("e.g. {}", stat.sample_value)
                        };
                        ui.label(
                            RichText::new(format!(
                                "{}, {} missing, {} unique, {sample}",
                                stat.kind, stat.missing_count, stat.unique_count
                            ))
                            .small(),
                        );
                    }
                });

            egui::CollapsingHeader::new(RichText::new("Processing log").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if insights.logs.is_empty() {
                        ui.label(RichText::new("No log lines.").weak());
                    }
                    for line in &insights.logs {
                        ui.label(RichText::new(line).monospace().small());
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let has_original = state.session.as_ref().is_some_and(|s| s.has_original());
        if state.session.is_some() {
            let current = state.settings.dataset;
            if ui
                .selectable_label(current == DatasetKind::Cleaned, "Cleaned")
                .clicked()
            {
                state.set_dataset_kind(DatasetKind::Cleaned);
            }
            if ui
                .add_enabled(
                    has_original,
                    egui::SelectableLabel::new(current == DatasetKind::Original, "Original"),
                )
                .clicked()
            {
                state.set_dataset_kind(DatasetKind::Original);
            }

            ui.separator();

            if let Some(ds) = state.dataset() {
                ui.label(format!(
                    "{} rows loaded, {} visible",
                    ds.len(),
                    state.views.sorted.len()
                ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open analysis result")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("Analysis result", &["json"])
        .add_filter("Cleaned CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` into the state, reporting failures in the status line.
pub fn open_path(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(result) => {
            log::info!(
                "Loaded {} cleaned rows from {}",
                result.cleaned_rows.len(),
                path.display()
            );
            state.set_result(result);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
