//! Glassy Calculator application

use egui::{Context, Key};
use glasscore::animation::FadeAnimation;
use glasscore::config::GlassConfig;
use glasscore::repaint::RepaintController;
use glasscore::theme::{toolbar, GlassTheme, ThemeMode};
use glasscore::widgets::{display_field, GlassButton};

use crate::calc::{Calculator, BUTTONS};

/// Height of one row of calculator buttons
const BUTTON_HEIGHT: f32 = 64.0;

/// Characters typed on the keyboard that map straight to a button.
const TYPED_LABELS: &str = "0123456789+-*/.=";

pub struct GlassCalcApp {
    calc: Calculator,
    /// Theme currently on screen; trails `calc.theme()` while fading
    applied: ThemeMode,
    fade: Option<FadeAnimation>,
    fade_secs: f32,
    repaint: RepaintController,
}

impl GlassCalcApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &GlassConfig) -> Self {
        config.theme.theme().apply(&cc.egui_ctx);
        Self::with_config(config)
    }

    fn with_config(config: &GlassConfig) -> Self {
        Self {
            calc: Calculator::new(config.theme),
            applied: config.theme,
            fade: None,
            fade_secs: config.fade_duration().as_secs_f32(),
            repaint: RepaintController::new(),
        }
    }

    /// Applied theme at the current fade opacity.
    fn visible_theme(&self) -> GlassTheme {
        match &self.fade {
            Some(fade) => self.applied.theme().faded(fade.opacity()),
            None => *self.applied.theme(),
        }
    }

    fn press(&mut self, label: &str) {
        log::debug!("press '{}'", label);
        self.calc.press(label);
    }

    fn toggle_theme(&mut self) {
        let mode = self.calc.toggle_theme();
        log::info!("switching to {} theme", mode);
        // restarting mid-fade is fine: completion applies the latest flag
        self.fade = Some(FadeAnimation::new(self.fade_secs));
    }

    fn step_fade(&mut self, ctx: &Context, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.update(dt);
        if fade.is_complete() {
            self.fade = None;
            self.applied = self.calc.theme();
            self.applied.theme().apply(ctx);
            log::info!("{} theme applied", self.applied);
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let typed: Vec<String> = ctx.input(|i| {
            let mut typed = Vec::new();
            for event in &i.events {
                if let egui::Event::Text(text) = event {
                    typed.extend(
                        text.chars()
                            .filter(|c| TYPED_LABELS.contains(*c))
                            .map(String::from),
                    );
                }
            }
            if i.key_pressed(Key::Enter) {
                typed.push("=".to_string());
            }
            typed
        });

        for label in typed {
            self.press(&label);
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui, theme: &GlassTheme) {
        let label = self.calc.theme().toggle_label();
        let mut toggle = false;
        toolbar(ui, theme, |ui| {
            toggle = ui
                .add(GlassButton::new(label, theme).font_size(14.0))
                .clicked();
        });
        if toggle {
            self.toggle_theme();
        }
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui, theme: &GlassTheme) {
        let gap = ui.spacing().item_spacing.x;
        let btn_w = (ui.available_width() - gap * 3.0) / 4.0;
        let size = egui::vec2(btn_w, BUTTON_HEIGHT);
        let mut clicked = None;

        for row in BUTTONS.chunks(4) {
            ui.horizontal(|ui| {
                for &label in row {
                    if ui.add(GlassButton::new(label, theme).size(size)).clicked() {
                        clicked = Some(label);
                    }
                }
            });
        }

        if let Some(label) = clicked {
            self.press(label);
        }
    }
}

impl eframe::App for GlassCalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let dt = self.repaint.begin_frame(ctx);
        self.step_fade(ctx, dt);
        self.handle_keys(ctx);

        let theme = self.visible_theme();
        egui::CentralPanel::default()
            .frame(theme.window_frame())
            .show(ctx, |ui| {
                self.render_toolbar(ui, &theme);
                display_field(ui, &theme, self.calc.display());
                ui.add_space(4.0);
                self.render_buttons(ui, &theme);
            });

        self.repaint.set_continuous(self.fade.is_some());
        self.repaint.end_frame(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(theme: ThemeMode) -> GlassCalcApp {
        GlassCalcApp::with_config(&GlassConfig {
            theme,
            ..GlassConfig::default()
        })
    }

    #[test]
    fn test_fade_applies_theme_on_completion() {
        let ctx = Context::default();
        let mut app = app(ThemeMode::Light);
        app.toggle_theme();
        app.step_fade(&ctx, 0.1);
        assert_eq!(app.applied, ThemeMode::Light);
        assert!(app.fade.is_some());

        app.step_fade(&ctx, 1.0);
        assert_eq!(app.applied, ThemeMode::Dark);
        assert!(app.fade.is_none());
        assert_eq!(ctx.style().visuals.override_text_color, Some(egui::Color32::WHITE));
    }

    #[test]
    fn test_toggle_mid_fade_applies_latest() {
        let ctx = Context::default();
        let mut app = app(ThemeMode::Light);
        app.toggle_theme();
        app.step_fade(&ctx, 0.1);
        app.toggle_theme();
        app.step_fade(&ctx, 0.25);
        // restarted: still running after more than the first fade had left
        assert!(app.fade.is_some());
        assert_eq!(app.applied, ThemeMode::Light);

        app.step_fade(&ctx, 1.0);
        assert!(app.fade.is_none());
        assert_eq!(app.applied, ThemeMode::Light);
        assert_eq!(app.calc.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_presses_during_fade_reach_buffer() {
        let ctx = Context::default();
        let mut app = app(ThemeMode::Dark);
        app.toggle_theme();
        app.press("7");
        app.press("*");
        app.step_fade(&ctx, 0.1);
        app.press("6");
        app.press("=");
        assert!(app.fade.is_some());
        assert_eq!(app.calc.display(), "42");
    }

    #[test]
    fn test_visible_theme_fades() {
        let ctx = Context::default();
        let mut app = app(ThemeMode::Light);
        assert_eq!(app.visible_theme(), GlassTheme::LIGHT);

        app.toggle_theme();
        app.step_fade(&ctx, 0.15);
        let theme = app.visible_theme();
        assert!(theme.window.fill.a < GlassTheme::LIGHT.window.fill.a);
        assert_eq!(theme.window.fill.r, GlassTheme::LIGHT.window.fill.r);

        app.step_fade(&ctx, 1.0);
        assert_eq!(app.visible_theme(), GlassTheme::DARK);
    }
}
