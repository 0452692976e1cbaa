use std::sync::Arc;

use crate::dashboard::{self, Dashboard, DashboardConfig};
use crate::data::filter::{filter, FilterState};
use crate::data::model::{CellValue, Dataset, Dimension};

// ---------------------------------------------------------------------------
// Selection events
// ---------------------------------------------------------------------------

/// A user interaction with one dimension's multi-select.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Toggle(CellValue),
    All,
    None,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; replaced wholesale on File → Open, never mutated.
    pub dataset: Arc<Dataset>,

    /// Per-dimension filter selections.
    pub filters: FilterState,

    /// Number of records passing the current filters.
    pub visible_count: usize,

    /// Sections for the current filtered table (cached).
    pub dashboard: Dashboard,

    pub config: DashboardConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let mut state = Self {
            filters: FilterState::all_selected(&dataset),
            dataset: Arc::new(dataset),
            visible_count: 0,
            dashboard: Dashboard::default(),
            config,
            status_message: None,
        };
        state.on_selection_changed();
        state
    }

    /// Ingest a newly loaded dataset and reset filters to "everything selected".
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = FilterState::all_selected(&dataset);
        self.dataset = Arc::new(dataset);
        self.status_message = None;
        self.on_selection_changed();
    }

    /// Selection changed: recompute the filtered table and rebuild every section.
    pub fn on_selection_changed(&mut self) {
        let rows = filter(&self.dataset, &self.filters);
        log::debug!(
            "Filter pass: {} of {} records selected",
            rows.len(),
            self.dataset.len()
        );
        if rows.is_empty() {
            log::warn!("Current filters exclude every record");
        }

        let dashboard = dashboard::build(&self.dataset, &self.filters, &rows, &self.config);
        self.visible_count = rows.len();
        self.dashboard = dashboard;
    }

    /// Dispatch a selection event for one dimension.
    pub fn apply(&mut self, dim: Dimension, event: SelectionEvent) {
        match event {
            SelectionEvent::Toggle(value) => self.toggle_filter_value(dim, &value),
            SelectionEvent::All => self.select_all(dim),
            SelectionEvent::None => self.select_none(dim),
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &CellValue) {
        self.filters.toggle(dim, value);
        self.on_selection_changed();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let dataset = Arc::clone(&self.dataset);
        if self.filters.select_all(dim, &dataset) {
            self.on_selection_changed();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        if self.filters.select_none(dim) {
            self.on_selection_changed();
        }
    }
}
