use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CellValue;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Data table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered, sorted rows. Clicking a header cycles its sort.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let mut clicked: Option<String> = None;

    if let Some(dataset) = state.dataset() {
        let view = &state.views.sorted;
        let sort = state.settings.sort.as_ref();

        if view.is_empty() {
            ui.label(RichText::new("No rows match the current query.").weak());
        }

        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .column(Column::auto().at_least(36.0))
                .columns(
                    Column::auto().at_least(80.0).clip(true),
                    dataset.columns.len(),
                )
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong("#");
                    });
                    for column in &dataset.columns {
                        header.col(|ui: &mut Ui| {
                            let arrow = match sort {
                                Some(spec) if &spec.column == column => spec.direction.arrow(),
                                _ => "",
                            };
                            let label = RichText::new(format!("{column} {arrow}")).strong();
                            if ui.add(egui::Button::new(label).frame(false)).clicked() {
                                clicked = Some(column.clone());
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.len(), |mut row| {
                        let position = row.index();
                        let index = view[position];
                        row.col(|ui: &mut Ui| {
                            ui.label(RichText::new((index + 1).to_string()).weak());
                        });
                        for column in &dataset.columns {
                            row.col(|ui: &mut Ui| match dataset.value(index, column) {
                                None | Some(CellValue::Null) => {
                                    ui.label(RichText::new("–").weak());
                                }
                                Some(CellValue::Number(n)) => {
                                    ui.monospace(n.to_string());
                                }
                                Some(value) => {
                                    ui.label(value.to_string());
                                }
                            });
                        }
                    });
                });
        });
    }

    if let Some(column) = clicked {
        state.cycle_sort(&column);
    }
}
