mod app;
mod state;
mod ui;

use app::DeudaApp;
use deuda_viewer::config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {e:#}");
        AppConfig::default()
    });
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so the configured logo can be shown.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DeudaApp::new(config)))
        }),
    )
}
