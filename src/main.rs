mod app;
mod color;
mod data;
mod fetch;
mod state;
mod ui;

use app::ParticulateApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Particulate Chart – Count Viewer",
        options,
        Box::new(|_cc| {
            let mut app = ParticulateApp::default();
            // Populate the document picker once at startup.
            app.state.refresh_documents();
            Ok(Box::new(app))
        }),
    )
}
