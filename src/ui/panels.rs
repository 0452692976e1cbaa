use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{CellValue, Dimension};
use crate::state::{AppState, SelectionEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = state.dataset.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let label = format!("Select {}", plural(dim));
                let selected = state.filters.selected(dim);
                if let Some(event) = multi_select(ui, &label, dataset.options(dim), selected) {
                    state.apply(dim, event);
                }
            }
        });
}

fn plural(dim: Dimension) -> &'static str {
    match dim {
        Dimension::Country => "Countries",
        Dimension::JobTitle => "Job Roles",
        Dimension::ExperienceLevel => "Experience Levels",
        Dimension::RemoteRatio => "Remote Work Ratios",
    }
}

/// A collapsible checkbox list. Returns what the user did this frame, if anything.
pub fn multi_select(
    ui: &mut Ui,
    label: &str,
    options: &BTreeSet<CellValue>,
    selected: &BTreeSet<CellValue>,
) -> Option<SelectionEvent> {
    let mut event = None;

    // Show count of selected / total in the header
    let header_text = format!("{label}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            // Select all / none buttons
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    event = Some(SelectionEvent::All);
                }
                if ui.small_button("None").clicked() {
                    event = Some(SelectionEvent::None);
                }
            });

            for val in options {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    event = Some(SelectionEvent::Toggle(val.clone()));
                }
            }
        });

    event
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} match filters",
            state.dataset.len(),
            state.visible_count
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
