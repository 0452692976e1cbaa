use std::collections::BTreeSet;

use crate::data::aggregate::{BoxGroup, BoxStats, GroupSummary, RankedGroup};
use crate::data::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Chart descriptions – immutable values consumed by a DisplaySurface
// ---------------------------------------------------------------------------

pub const SALARY_AXIS: &str = "Salary (USD)";
pub const AVERAGE_SALARY_AXIS: &str = "Average Salary (USD)";

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    BoxPlot(BoxPlotChart),
}

impl Chart {
    pub fn title(&self) -> Option<&str> {
        match self {
            Chart::Bar(c) => c.title.as_deref(),
            Chart::BoxPlot(c) => c.title.as_deref(),
        }
    }
}

/// Horizontal bars, one per category, drawn top to bottom in `bars` order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: Option<String>,
    pub category_axis: String,
    pub value_axis: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    /// `None` when the ranking is empty.
    pub fn from_ranking(
        title: Option<&str>,
        category_axis: &str,
        ranking: &[RankedGroup],
    ) -> Option<Self> {
        if ranking.is_empty() {
            return None;
        }
        Some(BarChart {
            title: title.map(str::to_string),
            category_axis: category_axis.to_string(),
            value_axis: AVERAGE_SALARY_AXIS.to_string(),
            bars: ranking.iter().map(|g| (g.key.to_string(), g.mean)).collect(),
        })
    }
}

/// Grouped box plot: one slot per category on the x-axis, one box per series inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotChart {
    pub title: Option<String>,
    pub category_axis: String,
    pub value_axis: String,
    pub series_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BoxSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSeries {
    pub name: String,
    /// (index into `categories`, statistics)
    pub boxes: Vec<(usize, BoxStats)>,
}

impl BoxPlotChart {
    /// Lay out box groups (sorted by category, then series). `None` when there are no groups.
    pub fn from_groups(
        title: &str,
        category_axis: &str,
        series_label: &str,
        groups: Vec<BoxGroup>,
    ) -> Option<Self> {
        if groups.is_empty() {
            return None;
        }
        let categories: Vec<CellValue> = groups
            .iter()
            .map(|g| g.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let series_names: Vec<CellValue> = groups
            .iter()
            .map(|g| g.series.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut series: Vec<BoxSeries> = series_names
            .iter()
            .map(|s| BoxSeries {
                name: s.to_string(),
                boxes: Vec::new(),
            })
            .collect();

        for group in groups {
            // Both lookups hit: the vectors were built from these groups.
            let (Ok(cat), Ok(ser)) = (
                categories.binary_search(&group.category),
                series_names.binary_search(&group.series),
            ) else {
                continue;
            };
            series[ser].boxes.push((cat, group.stats));
        }

        Some(BoxPlotChart {
            title: Some(title.to_string()),
            category_axis: category_axis.to_string(),
            value_axis: SALARY_AXIS.to_string(),
            series_label: series_label.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            series,
        })
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableView {
    pub fn summary(summary: &[GroupSummary]) -> Self {
        let columns = ["job_title", "employee_residence", "count", "mean", "median", "min", "max"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = summary
            .iter()
            .map(|g| {
                vec![
                    CellValue::String(g.job_title.clone()),
                    CellValue::String(g.employee_residence.clone()),
                    CellValue::Integer(g.stats.count as i64),
                    CellValue::Float(g.stats.mean),
                    CellValue::Float(g.stats.median),
                    CellValue::Float(g.stats.min),
                    CellValue::Float(g.stats.max),
                ]
            })
            .collect();
        TableView { columns, rows }
    }

    /// All source columns of the given records, row order preserved.
    pub fn records(dataset: &Dataset, rows: &[&Record]) -> Self {
        TableView {
            columns: dataset.columns.clone(),
            rows: rows.iter().map(|r| r.cells.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
