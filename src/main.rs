mod app;
mod color;
mod config;
mod data;
mod logging;
mod present;
mod report;
mod session;
mod state;
mod store;
mod ui;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use session::Session;
use state::AppState;

fn main() -> eframe::Result {
    let config = DashboardConfig::default();
    if let Err(e) = logging::init(&config.log_path) {
        eprintln!(
            "warning: could not log to {}: {e:#}",
            config.log_path.display()
        );
    }

    let title = config.window_title.clone();
    let state = AppState::new(Session::start(config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let heading = title.clone();
    let result = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(heading, state)))),
    );
    log::info!("Dashboard closed.");
    result
}
