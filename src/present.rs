use crate::report::catalog::Shape;
use crate::report::dispatcher::RenderableResult;
use crate::report::result::QueryResult;

/// Anything that can show report output to the user.
///
/// The egui front end implements this; tests use a recorder.
pub trait Presenter {
    fn heading(&mut self, text: &str);
    fn table(&mut self, result: &QueryResult);
    fn bar_chart(&mut self, result: &QueryResult);
    fn line_chart(&mut self, result: &QueryResult);
    fn scatter_plot(&mut self, result: &QueryResult);
    fn error_banner(&mut self, message: &str);
}

/// Draw a report result in the shape its catalog entry declares.
pub fn present(rendered: &RenderableResult, presenter: &mut dyn Presenter) {
    presenter.heading(rendered.report.title());
    let result = &rendered.result;
    match rendered.shape {
        Shape::Table => presenter.table(result),
        Shape::BarChart => presenter.bar_chart(result),
        Shape::LineChart => presenter.line_chart(result),
        Shape::ScatterPlot => presenter.scatter_plot(result),
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// One call made on a [`Recorder`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Heading(String),
        Table(usize),
        BarChart(usize),
        LineChart(usize),
        ScatterPlot(usize),
        Error(String),
    }

    /// Presenter that just remembers what it was asked to draw.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub events: Vec<Event>,
    }

    impl Recorder {
        pub fn errors(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Error(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for Recorder {
        fn heading(&mut self, text: &str) {
            self.events.push(Event::Heading(text.to_string()));
        }
        fn table(&mut self, result: &QueryResult) {
            self.events.push(Event::Table(result.len()));
        }
        fn bar_chart(&mut self, result: &QueryResult) {
            self.events.push(Event::BarChart(result.len()));
        }
        fn line_chart(&mut self, result: &QueryResult) {
            self.events.push(Event::LineChart(result.len()));
        }
        fn scatter_plot(&mut self, result: &QueryResult) {
            self.events.push(Event::ScatterPlot(result.len()));
        }
        fn error_banner(&mut self, message: &str) {
            self.events.push(Event::Error(message.to_string()));
        }
    }
}
