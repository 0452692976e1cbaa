/// Presentation layer: turns a filtered table into an ordered list of sections.
///
/// ```text
///   filtered rows ──► build() ──► Dashboard { sections } ──► render(surface)
/// ```
///
/// Sections are plain values; a [`DisplaySurface`] draws them one by one, so an
/// empty slice only affects its own section.

pub mod chart;

use crate::data::aggregate::{
    box_stats_by, mean_salary_by, mean_salary_in_slice, summary_by_job_and_country, top_n,
    RankedGroup, SliceRanking,
};
use crate::data::filter::FilterState;
use crate::data::model::{Dataset, Dimension, Record};

use chart::{BarChart, BoxPlotChart, Chart, TableView};

pub const TITLE: &str = "Data Science Job Salaries Analysis Dashboard";
pub const INTRO: &str = "Analyze salary metrics and distributions for selected jobs, countries, \
experience levels, and remote work ratios.";
pub const NO_DATA: &str = "No data for the current selection.";

// ---------------------------------------------------------------------------
// Rendering sink
// ---------------------------------------------------------------------------

/// Where a dashboard is drawn.
pub trait DisplaySurface {
    fn heading(&mut self, text: &str);
    fn subheading(&mut self, text: &str);
    fn text(&mut self, text: &str);
    fn table(&mut self, table: &TableView);
    fn chart(&mut self, chart: &Chart);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Number of job titles listed in the recommendations.
    pub top_jobs: usize,
    /// Number of experience levels listed in the recommendations.
    pub top_levels: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_jobs: 5,
            top_levels: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Heading(String),
    Subheading(String),
    Text(String),
    Table(TableView),
    Chart(Chart),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub sections: Vec<Section>,
}

impl Dashboard {
    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        for section in &self.sections {
            match section {
                Section::Heading(t) => surface.heading(t),
                Section::Subheading(t) => surface.subheading(t),
                Section::Text(t) => surface.text(t),
                Section::Table(table) => surface.table(table),
                Section::Chart(chart) => surface.chart(chart),
            }
        }
    }

    fn heading(&mut self, text: &str) {
        self.sections.push(Section::Heading(text.to_string()));
    }

    fn text(&mut self, text: impl Into<String>) {
        self.sections.push(Section::Text(text.into()));
    }

    fn chart_or_placeholder(&mut self, chart: Option<Chart>) {
        match chart {
            Some(c) => self.sections.push(Section::Chart(c)),
            None => self.text(NO_DATA),
        }
    }

    fn table_or_placeholder(&mut self, table: TableView) {
        if table.is_empty() {
            self.text(NO_DATA);
        } else {
            self.sections.push(Section::Table(table));
        }
    }
}

/// Build every dashboard section for the filtered rows, in display order.
pub fn build(
    dataset: &Dataset,
    filters: &FilterState,
    rows: &[&Record],
    config: &DashboardConfig,
) -> Dashboard {
    let mut d = Dashboard::default();

    d.heading("Salary Summary Statistics");
    d.table_or_placeholder(TableView::summary(&summary_by_job_and_country(rows)));

    d.heading("Salary Distribution by Experience Level and Job Role");
    d.chart_or_placeholder(box_chart(
        rows,
        "Salary Distribution by Experience Level and Job Role",
        Dimension::ExperienceLevel,
        Dimension::JobTitle,
    ));

    d.heading("Salary Distribution by Remote Work Ratio and Job Role");
    d.chart_or_placeholder(box_chart(
        rows,
        "Salary Distribution by Remote Work Ratio and Job Role",
        Dimension::RemoteRatio,
        Dimension::JobTitle,
    ));

    d.heading("Average Salary Comparison by Job Role");
    d.chart_or_placeholder(bar_chart(
        rows,
        Some("Average Salary across Selected Countries"),
        Dimension::JobTitle,
    ));

    d.heading("Average Salary Comparison by Country");
    d.chart_or_placeholder(bar_chart(
        rows,
        Some("Average Salary across Selected Job Roles"),
        Dimension::Country,
    ));

    d.heading("Individual Salary Comparison: By Job Role per Country");
    slice_charts(&mut d, rows, filters, Dimension::JobTitle, Dimension::Country);

    d.heading("Individual Salary Comparison: By Country per Job Role");
    slice_charts(&mut d, rows, filters, Dimension::Country, Dimension::JobTitle);

    d.heading("Average Salary by Remote Work Ratio");
    d.chart_or_placeholder(bar_chart(
        rows,
        Some("Average Salary by Remote Work Ratio"),
        Dimension::RemoteRatio,
    ));

    d.heading("Salary Distribution by Remote Work Ratio for Different Job Roles");
    d.chart_or_placeholder(box_chart(
        rows,
        "Salary Distribution by Remote Work Ratio Across Job Roles",
        Dimension::RemoteRatio,
        Dimension::JobTitle,
    ));

    d.heading("Salary Distribution by Remote Work Ratio for Different Countries");
    d.chart_or_placeholder(box_chart(
        rows,
        "Salary Distribution by Remote Work Ratio Across Countries",
        Dimension::RemoteRatio,
        Dimension::Country,
    ));

    d.heading("Career Recommendations");
    recommendations(&mut d, rows, config);

    d.heading("Filtered Dataset Sample");
    d.table_or_placeholder(TableView::records(dataset, rows));

    log::debug!("Built dashboard with {} sections", d.sections.len());
    d
}

fn bar_chart(rows: &[&Record], title: Option<&str>, dim: Dimension) -> Option<Chart> {
    BarChart::from_ranking(title, dim.label(), &mean_salary_by(rows, dim)).map(Chart::Bar)
}

fn box_chart(rows: &[&Record], title: &str, x: Dimension, series: Dimension) -> Option<Chart> {
    BoxPlotChart::from_groups(title, x.label(), series.label(), box_stats_by(rows, x, series))
        .map(Chart::BoxPlot)
}

/// One chart per selected value of `slice_dim`, ranking `group_dim` within it.
fn slice_charts(
    d: &mut Dashboard,
    rows: &[&Record],
    filters: &FilterState,
    slice_dim: Dimension,
    group_dim: Dimension,
) {
    let noun = match slice_dim {
        Dimension::JobTitle => "job role",
        Dimension::Country => "country",
        Dimension::ExperienceLevel => "experience level",
        Dimension::RemoteRatio => "remote work ratio",
    };

    for value in filters.selected(slice_dim) {
        match mean_salary_in_slice(rows, slice_dim, value, group_dim) {
            SliceRanking::NoData => {
                log::debug!("No rows for {noun} {value}");
                d.text(format!("No data for {noun}: {value}"));
            }
            SliceRanking::Ranked(ranking) => {
                d.sections.push(Section::Subheading(format!(
                    "Average Salary by {} for {}: {value}",
                    group_dim.label(),
                    slice_dim.label()
                )));
                d.chart_or_placeholder(
                    BarChart::from_ranking(None, group_dim.label(), &ranking).map(Chart::Bar),
                );
            }
        }
    }
}

fn recommendations(d: &mut Dashboard, rows: &[&Record], config: &DashboardConfig) {
    if rows.is_empty() {
        d.text(NO_DATA);
        return;
    }

    let join = |ranking: &[RankedGroup]| {
        ranking
            .iter()
            .map(|g| g.key.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let jobs = mean_salary_by(rows, Dimension::JobTitle);
    let levels = mean_salary_by(rows, Dimension::ExperienceLevel);

    d.text(format!(
        "Top {} Highest Paying Job Roles: {}",
        config.top_jobs,
        join(top_n(&jobs, config.top_jobs))
    ));
    d.text(format!(
        "Experience Levels with Best Pay: {}",
        join(top_n(&levels, config.top_levels))
    ));
    d.text("Focus on the above roles and experience levels to improve your career prospects and salary.");
}
