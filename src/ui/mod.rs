pub mod panels;
pub mod plot;
pub mod table;

use eframe::egui::{Color32, RichText, Ui};

use crate::present::Presenter;
use crate::report::result::QueryResult;

/// Draws report output into an egui region.
pub struct EguiPresenter<'a> {
    ui: &'a mut Ui,
}

impl<'a> EguiPresenter<'a> {
    pub fn new(ui: &'a mut Ui) -> Self {
        Self { ui }
    }
}

impl Presenter for EguiPresenter<'_> {
    fn heading(&mut self, text: &str) {
        self.ui.heading(text);
        self.ui.add_space(4.0);
    }

    fn table(&mut self, result: &QueryResult) {
        table::result_table(self.ui, result);
    }

    fn bar_chart(&mut self, result: &QueryResult) {
        plot::bar_chart(self.ui, result);
    }

    fn line_chart(&mut self, result: &QueryResult) {
        plot::line_chart(self.ui, result);
    }

    fn scatter_plot(&mut self, result: &QueryResult) {
        plot::scatter_plot(self.ui, result);
    }

    fn error_banner(&mut self, message: &str) {
        self.ui.label(RichText::new(message).color(Color32::RED).strong());
    }
}
