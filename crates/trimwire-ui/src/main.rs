#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod modules;
mod theme;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("✂ TrimWire")
            .with_inner_size([880.0, 600.0])
            .with_min_inner_size([640.0, 460.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "TrimWire",
        native_options,
        Box::new(|cc| {
            let app = app::TrimWireApp::new(cc)?;
            Ok(Box::new(app))
        }),
    )
}
