mod app;
mod color;
mod config;
mod data;
mod error;
mod session;
mod state;
mod ui;

use app::PremierStatsApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("premier_stats=info"))
        .init();

    let config = DashboardConfig::from_env();
    log::debug!("configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Premier League Player Stats Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PremierStatsApp::new(config)))),
    )
}
