use eframe::egui;

use crate::session::show_outcome;
use crate::state::AppState;
use crate::ui::{panels, EguiPresenter};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    title: String,
}

impl DashboardApp {
    pub fn new(title: impl Into<String>, state: AppState) -> Self {
        Self {
            state,
            title: title.into(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: dataset summary ----
        if self.state.session().is_some() {
            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
                panels::top_bar(ui, &self.state);
            });
        }

        // ---- Central panel: selector and report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.title.as_str());
            ui.separator();

            // Startup failed: banner only, no report controls.
            if let Err(e) = &self.state.startup {
                e.surface(&mut EguiPresenter::new(ui));
                return;
            }

            panels::report_selector(ui, &mut self.state);
            ui.separator();

            if let Some(outcome) = &self.state.outcome {
                show_outcome(outcome, &mut EguiPresenter::new(ui));
            }
        });
    }
}
