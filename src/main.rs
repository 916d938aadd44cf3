use eframe::egui;
use spectral_viewer::app::SpectralViewerApp;
use spectral_viewer::config::{APP_NAME, INITIAL_WINDOW_SIZE, MIN_WINDOW_SIZE};

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(SpectralViewerApp::new(cc)))),
    )
}
