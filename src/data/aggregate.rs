//! Group-by statistics over a filtered table.
//!
//! Groups are kept in order of first appearance; rankings are produced with a
//! stable sort so equal means keep that order.

use std::collections::HashMap;
use std::hash::Hash;

use super::model::{CellValue, Dimension, Record};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Collect the salaries of `rows` per key, keys in order of first appearance.
/// Rows without a key or without a salary are skipped.
fn group_salaries<'a, K, F>(rows: &[&'a Record], key: F) -> Vec<(K, Vec<f64>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a Record) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<f64>)> = Vec::new();

    for &rec in rows {
        let (Some(k), Some(salary)) = (key(rec), rec.salary_in_usd) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(salary);
    }
    groups
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl SalaryStats {
    /// `None` for an empty group.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        Some(SalaryStats {
            count: values.len(),
            mean: mean(values),
            median: quantile(&sorted, 0.5),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// One row of the job × country summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub job_title: String,
    pub employee_residence: String,
    pub stats: SalaryStats,
}

/// Mean / median / min / max salary per (job title, country) pair.
pub fn summary_by_job_and_country(rows: &[&Record]) -> Vec<GroupSummary> {
    group_salaries(rows, |r| {
        Some((r.job_title.clone()?, r.employee_residence.clone()?))
    })
    .into_iter()
    .filter_map(|((job_title, employee_residence), salaries)| {
        Some(GroupSummary {
            job_title,
            employee_residence,
            stats: SalaryStats::from_values(&salaries)?,
        })
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RankedGroup {
    pub key: CellValue,
    pub mean: f64,
}

/// Groups sorted by mean salary, highest first.
pub type Ranking = Vec<RankedGroup>;

/// Mean salary per value of `dim`, sorted descending. Ties keep first-appearance order.
pub fn mean_salary_by(rows: &[&Record], dim: Dimension) -> Ranking {
    let mut ranking: Ranking = group_salaries(rows, |r| r.dimension(dim))
        .into_iter()
        .map(|(key, salaries)| RankedGroup {
            key,
            mean: mean(&salaries),
        })
        .collect();
    // `sort_by` is stable.
    ranking.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranking
}

/// The first `n` entries of a ranking (all of them if there are fewer).
pub fn top_n(ranking: &[RankedGroup], n: usize) -> &[RankedGroup] {
    &ranking[..n.min(ranking.len())]
}

// ---------------------------------------------------------------------------
// Slices
// ---------------------------------------------------------------------------

/// Rows whose `dim` value equals `value`.
pub fn slice<'a>(rows: &[&'a Record], dim: Dimension, value: &CellValue) -> Vec<&'a Record> {
    rows.iter()
        .copied()
        .filter(|r| r.dimension(dim).as_ref() == Some(value))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliceRanking {
    Ranked(Ranking),
    /// The slice has no rows.
    NoData,
}

/// Restrict to `slice_dim == value`, then rank mean salary by `group_dim`.
pub fn mean_salary_in_slice(
    rows: &[&Record],
    slice_dim: Dimension,
    value: &CellValue,
    group_dim: Dimension,
) -> SliceRanking {
    let sliced = slice(rows, slice_dim, value);
    if sliced.is_empty() {
        return SliceRanking::NoData;
    }
    SliceRanking::Ranked(mean_salary_by(&sliced, group_dim))
}

// ---------------------------------------------------------------------------
// Box-plot statistics
// ---------------------------------------------------------------------------

/// Tukey box statistics: quartiles by linear interpolation, whiskers at the
/// most extreme values within 1.5 × IQR of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().copied().filter(|v| (lo..=hi).contains(v));
        let lower_whisker = inside.clone().next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(q3);
        let outliers = sorted.iter().copied().filter(|v| !(lo..=hi).contains(v)).collect();

        Some(BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// One box: salaries of rows with `category` on the x-axis and `series` as hue.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub category: CellValue,
    pub series: CellValue,
    pub stats: BoxStats,
}

/// Box statistics per (category, series) pair, sorted by category then series.
pub fn box_stats_by(rows: &[&Record], category_dim: Dimension, series_dim: Dimension) -> Vec<BoxGroup> {
    let mut groups: Vec<BoxGroup> = group_salaries(rows, |r| {
        Some((r.dimension(category_dim)?, r.dimension(series_dim)?))
    })
    .into_iter()
    .filter_map(|((category, series), salaries)| {
        Some(BoxGroup {
            category,
            series,
            stats: BoxStats::from_values(&salaries)?,
        })
    })
    .collect();
    groups.sort_by(|a, b| (&a.category, &a.series).cmp(&(&b.category, &b.series)));
    groups
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation quantile of already sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
