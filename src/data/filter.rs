use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset, Dimension, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection: maps each dimension → set of selected values.
/// Always holds all four dimensions; an empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selections: BTreeMap<Dimension, BTreeSet<CellValue>>,
}

impl FilterState {
    /// Every distinct value selected (i.e., show everything).
    pub fn all_selected(dataset: &Dataset) -> Self {
        let selections = Dimension::ALL
            .iter()
            .map(|&dim| (dim, dataset.options(dim).clone()))
            .collect();
        FilterState { selections }
    }

    /// Selected values of one dimension, in ascending order.
    pub fn selected(&self, dim: Dimension) -> &BTreeSet<CellValue> {
        &self.selections[&dim]
    }

    /// Replace a dimension's selection. Returns whether anything changed.
    pub fn select(&mut self, dim: Dimension, values: BTreeSet<CellValue>) -> bool {
        let current = self.selections.entry(dim).or_default();
        if *current == values {
            return false;
        }
        *current = values;
        true
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle(&mut self, dim: Dimension, value: &CellValue) {
        let selected = self.selections.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    pub fn select_all(&mut self, dim: Dimension, dataset: &Dataset) -> bool {
        self.select(dim, dataset.options(dim).clone())
    }

    pub fn select_none(&mut self, dim: Dimension) -> bool {
        self.select(dim, BTreeSet::new())
    }

    /// A record passes when every dimension value is present and selected.
    /// Records with a null dimension never pass.
    pub fn matches(&self, record: &Record) -> bool {
        self.selections.iter().all(|(&dim, selected)| {
            record
                .dimension(dim)
                .is_some_and(|val| selected.contains(&val))
        })
    }
}

/// Records passing all filters, in dataset order.
pub fn filter<'a>(dataset: &'a Dataset, filters: &FilterState) -> Vec<&'a Record> {
    filter_records(&dataset.records, filters)
}

/// Apply the filters to any sequence of records, preserving order.
pub fn filter_records<'a, I>(records: I, filters: &FilterState) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| filters.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, sample_dataset};

    fn set(values: &[&str]) -> BTreeSet<CellValue> {
        values.iter().map(|&v| CellValue::from(v)).collect()
    }

    #[test]
    fn test_default_state_reproduces_dataset() {
        let ds = sample_dataset();
        let filters = FilterState::all_selected(&ds);
        let rows = filter(&ds, &filters);
        assert_eq!(rows.len(), ds.len());
        for (got, want) in rows.iter().zip(&ds.records) {
            assert_eq!(*got, want);
        }
    }

    #[test]
    fn test_country_filter_excludes_other_rows() {
        let ds = sample_dataset();
        let mut filters = FilterState::all_selected(&ds);
        assert!(filters.select(Dimension::Country, set(&["US"])));

        let rows = filter(&ds, &filters);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.job_title.as_deref() == Some("A")));
        assert_eq!(rows, vec![&ds.records[0], &ds.records[1]]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = sample_dataset();
        let mut filters = FilterState::all_selected(&ds);
        filters.toggle(Dimension::RemoteRatio, &CellValue::Integer(0));

        let once = filter(&ds, &filters);
        let twice = filter_records(once.iter().copied(), &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_row_passes_only_when_every_dimension_matches() {
        let ds = sample_dataset();
        let mut filters = FilterState::all_selected(&ds);
        filters.select(Dimension::Country, set(&["US", "DE"]));
        filters.select(Dimension::ExperienceLevel, set(&["SE"]));

        let rows = filter(&ds, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_residence.as_deref(), Some("DE"));

        for rec in &ds.records {
            let expected = Dimension::ALL.iter().all(|&d| {
                rec.dimension(d)
                    .is_some_and(|v| filters.selected(d).contains(&v))
            });
            assert_eq!(filters.matches(rec), expected);
        }
    }

    #[test]
    fn test_empty_selection_yields_empty_table() {
        let ds = sample_dataset();
        let mut filters = FilterState::all_selected(&ds);
        assert!(filters.select_none(Dimension::JobTitle));
        assert!(filter(&ds, &filters).is_empty());

        assert!(filters.select_all(Dimension::JobTitle, &ds));
        assert!(!filters.select_all(Dimension::JobTitle, &ds));
        assert_eq!(filter(&ds, &filters).len(), 3);
    }

    #[test]
    fn test_null_dimension_never_matches() {
        let mut rec = record("A", "US", "EN", 100, 1.0);
        rec.experience_level = None;
        let ds = Dataset::from_records(sample_dataset().columns, vec![rec, record("A", "US", "EN", 100, 2.0)]);
        let filters = FilterState::all_selected(&ds);
        assert_eq!(filter(&ds, &filters), vec![&ds.records[1]]);
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let ds = sample_dataset();
        let mut filters = FilterState::all_selected(&ds);
        let us = CellValue::from("US");
        filters.toggle(Dimension::Country, &us);
        assert!(!filters.selected(Dimension::Country).contains(&us));
        filters.toggle(Dimension::Country, &us);
        assert!(filters.selected(Dimension::Country).contains(&us));
    }
}
