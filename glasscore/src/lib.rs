//! glasscore — shared library for the glass calculator

pub mod animation;
pub mod config;
pub mod repaint;
pub mod theme;
pub mod widgets;

pub use animation::FadeAnimation;
pub use config::GlassConfig;
pub use repaint::RepaintController;
pub use theme::{GlassTheme, ThemeMode};

/// Initial window position, offset by `GLASSCALC_CASCADE` so several
/// instances don't stack exactly on top of each other.
pub fn window_position() -> egui::Pos2 {
    let offset = std::env::var("GLASSCALC_CASCADE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| (n as f32) * 30.0)
        .unwrap_or(0.0);
    egui::Pos2::new(100.0 + offset, 100.0 + offset)
}
