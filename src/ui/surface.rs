use std::ops::RangeInclusive;

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart as PlotBars, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoints,
    Points,
};

use crate::color::ColorMap;
use crate::dashboard::chart::{BarChart, BoxPlotChart, Chart, TableView};
use crate::dashboard::DisplaySurface;

const CHART_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 300.0;
const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// egui display surface
// ---------------------------------------------------------------------------

/// Draws dashboard sections into an egui `Ui`, top to bottom.
pub struct EguiSurface<'a> {
    ui: &'a mut Ui,
    /// Per-frame counter giving each table and plot a stable id.
    next_id: usize,
}

impl<'a> EguiSurface<'a> {
    pub fn new(ui: &'a mut Ui) -> Self {
        Self { ui, next_id: 0 }
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", self.next_id)
    }
}

impl DisplaySurface for EguiSurface<'_> {
    fn heading(&mut self, text: &str) {
        self.ui.add_space(12.0);
        self.ui.heading(text);
        self.ui.separator();
    }

    fn subheading(&mut self, text: &str) {
        self.ui.add_space(6.0);
        self.ui.label(RichText::new(text).strong().size(15.0));
    }

    fn text(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn table(&mut self, table: &TableView) {
        let id = self.id("table");
        self.ui.push_id(id, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .max_scroll_height(TABLE_HEIGHT)
                .columns(Column::auto().at_least(60.0), table.columns.len())
                .header(20.0, |mut header| {
                    for name in &table.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                        let cells = &table.rows[row.index()];
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
    }

    fn chart(&mut self, chart: &Chart) {
        let id = self.id("chart");
        if let Some(title) = chart.title() {
            self.ui.label(RichText::new(title).italics());
        }
        match chart {
            Chart::Bar(c) => bar_plot(self.ui, &id, c),
            Chart::BoxPlot(c) => box_plot(self.ui, &id, c),
        }
    }
}

/// Axis formatter showing category labels at integer positions.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v.fract().abs() > f64::EPSILON || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Bar chart: horizontal bars, highest mean at the top
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, id: &str, chart: &BarChart) {
    let n = chart.bars.len();
    let colors = ColorMap::new(chart.bars.iter().map(|(label, _)| label.as_str()));

    // Position 0 is the bottom of the plot, so the first bar gets the highest slot.
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, mean))| {
            Bar::new((n - 1 - i) as f64, *mean)
                .name(label)
                .width(0.7)
                .fill(colors.color_for(label))
        })
        .collect();
    let labels: Vec<String> = chart.bars.iter().rev().map(|(l, _)| l.clone()).collect();

    let height = (n as f32 * 24.0).clamp(120.0, CHART_HEIGHT * 2.0);
    Plot::new(id)
        .height(height)
        .x_axis_label(chart.value_axis.as_str())
        .y_axis_label(chart.category_axis.as_str())
        .y_axis_formatter(category_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(PlotBars::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Grouped box plot
// ---------------------------------------------------------------------------

fn box_plot(ui: &mut Ui, id: &str, chart: &BoxPlotChart) {
    let n_series = chart.series.len().max(1);
    let colors = ColorMap::new(chart.series.iter().map(|s| s.name.as_str()));
    let slot = 0.8 / n_series as f64;

    ui.label(RichText::new(format!("Series: {}", chart.series_label)).small());

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.category_axis.as_str())
        .y_axis_label(chart.value_axis.as_str())
        .x_axis_formatter(category_formatter(chart.categories.clone()))
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (s, series) in chart.series.iter().enumerate() {
                let color = colors.color_for(&series.name);
                // Offset each series inside its category slot.
                let offset = -0.4 + slot * (s as f64 + 0.5);

                let boxes: Vec<BoxElem> = series
                    .boxes
                    .iter()
                    .map(|(cat, st)| {
                        BoxElem::new(
                            *cat as f64 + offset,
                            BoxSpread::new(st.lower_whisker, st.q1, st.median, st.q3, st.upper_whisker),
                        )
                        .name(format!("{} / {}", chart.categories[*cat], series.name))
                        .box_width(slot * 0.9)
                        .whisker_width(slot * 0.5)
                        .fill(color.gamma_multiply(0.5))
                        .stroke(egui::Stroke::new(1.0, color))
                    })
                    .collect();
                plot_ui.box_plot(BoxPlot::new(boxes).name(&series.name).color(color));

                let outliers: PlotPoints = series
                    .boxes
                    .iter()
                    .flat_map(|(cat, st)| {
                        st.outliers.iter().map(move |&v| [*cat as f64 + offset, v])
                    })
                    .collect();
                plot_ui.points(Points::new(outliers).color(color).radius(2.0));
            }
        });
}
