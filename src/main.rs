//! Entry point for the egui-based launch records dashboard.

use std::path::PathBuf;

use eframe::egui;

use launchboard::app::LaunchboardApp;
use launchboard::data::loader;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line. A file that fails to load
    // here is fatal; files opened later through the UI only surface an
    // error message in the top bar.
    let initial = std::env::args().nth(1).map(PathBuf::from).map(|path| {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} launches from {}", dataset.len(), path.display());
                dataset
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                std::process::exit(1);
            }
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launchboard – Launch Records Dashboard",
        options,
        Box::new(move |_cc| {
            let app = match initial {
                Some(dataset) => LaunchboardApp::with_dataset(dataset),
                None => LaunchboardApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
