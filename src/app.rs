use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, summary, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PremierStatsApp {
    pub state: AppState,
}

impl PremierStatsApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for PremierStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if self.state.session.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_failure(ui, &mut self.state);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, leaderboard, tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.state.session else {
                return;
            };

            summary::header(ui);
            summary::metrics(ui, session);
            ui.separator();
            summary::leaderboard(ui, session);
            ui.separator();

            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.tab, tab, tab.label());
                }
            });
            ui.separator();

            match self.state.tab {
                Tab::BarChart => plot::bar_chart(ui, session),
                Tab::ScatterPlot => plot::scatter_plot(ui, session),
                Tab::DataTable => table::data_table(ui, session),
            }
        });
    }
}
