use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table, widgets};

/// Tabs of the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentralTab {
    #[default]
    Table,
    Chart,
    Correlation,
    Quality,
}

impl CentralTab {
    const ALL: [CentralTab; 4] = [
        CentralTab::Table,
        CentralTab::Chart,
        CentralTab::Correlation,
        CentralTab::Quality,
    ];

    fn label(self) -> &'static str {
        match self {
            CentralTab::Table => "Table",
            CentralTab::Chart => "Chart",
            CentralTab::Correlation => "Correlation",
            CentralTab::Quality => "Quality",
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyLensApp {
    pub state: AppState,
    tab: CentralTab,
}

impl RustyLensApp {
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config.translator(), config.notice_duration());
        if let Some(path) = &config.file {
            panels::open_path(&mut state, path);
        }
        Self {
            state,
            tab: CentralTab::default(),
        }
    }
}

impl eframe::App for RustyLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.poll_translation(now);
        self.state.expire_notice(now);

        // keep frames coming while something is pending in the background
        if self.state.translation_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        if let Some(notice) = &self.state.notice {
            ctx.request_repaint_after(notice.expires_at.saturating_duration_since(now));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: query + insights ----
        egui::SidePanel::left("query_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table / chart / heatmap / gauge ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open an analysis result to explore it  (File → Open…)");
                });
                return;
            }

            ui.horizontal(|ui| {
                for tab in CentralTab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
            });
            ui.separator();

            match self.tab {
                CentralTab::Table => table::data_table(ui, &mut self.state),
                CentralTab::Chart => plot::chart_panel(ui, &mut self.state),
                CentralTab::Correlation => {
                    if let Some(session) = &self.state.session {
                        widgets::correlation_heatmap(ui, &session.correlation);
                    }
                }
                CentralTab::Quality => {
                    if let Some(session) = &self.state.session {
                        widgets::quality_gauge(ui, &session.gauge);
                    }
                }
            }
        });
    }
}
