use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::report::result::QueryResult;

const ROW_HEIGHT: f32 = 20.0;

/// Render a result as a striped table with one column per result column.
pub fn result_table(ui: &mut Ui, result: &QueryResult) {
    if result.is_empty() {
        ui.label("No rows.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::auto().at_least(80.0), result.columns.len())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in &result.columns {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|mut body| {
            for (i, row) in result.rows.iter().enumerate() {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(i.to_string());
                    });
                    for cell in row {
                        table_row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            }
        });
}
