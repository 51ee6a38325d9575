use eframe::egui;
use tangocho::gui::TangochoApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    let title = format!("Tangocho {}", env!("CARGO_PKG_VERSION"));
    eframe::run_native(&title, options, Box::new(|cc| Ok(Box::new(TangochoApp::new(cc)))))
}
