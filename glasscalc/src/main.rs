//! Glassy Calculator
//!
//! A translucent calculator with a light/dark theme toggle.

mod app;
mod calc;
mod eval;

use app::GlassCalcApp;
use eframe::NativeOptions;
use glasscore::GlassConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GlassConfig::load();
    log::info!(
        "starting glasscalc (theme: {}, fade: {} ms)",
        config.theme,
        config.fade_ms
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 500.0])
            .with_position(glasscore::window_position())
            .with_transparent(true)
            .with_title("Glassy Calculator"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Glassy Calculator",
        options,
        Box::new(move |cc| Box::new(GlassCalcApp::new(cc, &config))),
    );
    if let Err(e) = &result {
        log::error!("calculator exited with error: {}", e);
    }
    result
}
