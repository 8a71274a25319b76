use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{self, SCATTER};
use crate::report::result::QueryResult;

// ---------------------------------------------------------------------------
// Bar chart: first column is the category, each further column a series
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, result: &QueryResult) {
    let categories: Vec<String> = result.column(0).map(|v| v.to_string()).collect();
    let series = result.columns.len().saturating_sub(1);
    let colours = color::series_palette(series);
    let bar_width = 0.8 / series.max(1) as f64;

    let charts: Vec<BarChart> = (1..=series)
        .map(|col| {
            let offset = (col as f64 - 1.0 - (series as f64 - 1.0) / 2.0) * bar_width;
            let bars: Vec<Bar> = result
                .column(col)
                .enumerate()
                .map(|(i, v)| {
                    Bar::new(i as f64 + offset, v.as_f64().unwrap_or(0.0))
                        .width(bar_width)
                        .name(&categories[i])
                })
                .collect();
            BarChart::new(bars)
                .name(&result.columns[col])
                .color(colours[col - 1])
        })
        .collect();

    Plot::new("report_bar_chart")
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .y_axis_label(value_axis_label(result))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label for an x grid mark, blank between category positions.
fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

fn value_axis_label(result: &QueryResult) -> String {
    match result.columns.len() {
        2 => result.columns[1].clone(),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Line chart: first column numeric x, each further column a line
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, result: &QueryResult) {
    let colours = color::series_palette(result.columns.len().saturating_sub(1));
    let x_label = result.columns.first().cloned().unwrap_or_default();

    Plot::new("report_line_chart")
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(value_axis_label(result))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (col, colour) in (1..result.columns.len()).zip(colours) {
                let points: PlotPoints = result
                    .rows
                    .iter()
                    .filter_map(|row| Some([row.first()?.as_f64()?, row.get(col)?.as_f64()?]))
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&result.columns[col])
                        .color(colour)
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plot: two numeric columns
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, result: &QueryResult) {
    let points: PlotPoints = result
        .rows
        .iter()
        .filter_map(|row| Some([row.first()?.as_f64()?, row.get(1)?.as_f64()?]))
        .collect();

    Plot::new("report_scatter_plot")
        .x_axis_label(axis_title(result, 0))
        .y_axis_label(axis_title(result, 1))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(3.0).color(SCATTER));
        });
}

/// "budget" → "Budget".
fn axis_title(result: &QueryResult, idx: usize) -> String {
    let name = result.columns.get(idx).map(String::as_str).unwrap_or_default();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
