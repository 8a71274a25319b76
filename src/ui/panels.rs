use eframe::egui::{self, Ui};

use crate::report::catalog::ReportId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Report selection
// ---------------------------------------------------------------------------

/// The "Choose an Analysis Option" drop-down over the ten reports.
pub fn report_selector(ui: &mut Ui, state: &mut AppState) {
    let mut choice = state.selected;
    ui.strong("Choose an Analysis Option:");
    egui::ComboBox::from_id_salt("report_selector")
        .width(320.0)
        .selected_text(choice.label())
        .show_ui(ui, |ui: &mut Ui| {
            for id in ReportId::ALL {
                ui.selectable_value(&mut choice, id, id.label());
            }
        });
    state.select(choice);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Dataset summary shown above the dashboard.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    let Some(session) = state.session() else {
        return;
    };
    let report = session.clean_report();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} movies loaded, {} kept after cleaning",
            report.input_rows, report.kept
        ));
        ui.separator();
        ui.label(format!(
            "Database: {}",
            session.config().database_path.display()
        ));
    });
}
