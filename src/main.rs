mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::Result;
use app::SalaryExplorerApp;
use clap::Parser;
use eframe::egui;

use crate::config::Args;
use crate::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Without data there is nothing to show.
    let dataset = data::loader::load_file(args.data_path()).inspect_err(|e| {
        log::error!("Failed to load dataset: {e:#}");
    })?;
    let state = AppState::new(dataset, args.dashboard_config());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        dashboard::TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SalaryExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
