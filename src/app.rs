use deuda_viewer::config::AppConfig;
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DeudaApp {
    pub state: AppState,
}

impl DeudaApp {
    /// Build the app and load the configured dataset right away.
    pub fn new(config: AppConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load_source(data_path);
        Self { state }
    }
}

impl eframe::App for DeudaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: rows and totals ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::debt_table(ui, &self.state);
        });
    }
}
