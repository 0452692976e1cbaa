use eframe::egui::{self, ScrollArea, Ui};

use crate::dashboard;
use crate::state::AppState;
use crate::ui::panels;
use crate::ui::surface::EguiSurface;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryExplorerApp {
    pub state: AppState,
}

impl SalaryExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalaryExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading(egui::RichText::new(dashboard::TITLE).size(24.0));
                    ui.label(dashboard::INTRO);
                    self.state.dashboard.render(&mut EguiSurface::new(ui));
                });
        });
    }
}
