//! Glass theme: translucent fills, rounded corners, light and dark.
//!
//! Every colour the calculator paints comes from one of the two
//! [`GlassTheme`] records below. Widgets read their role's style from the
//! active record instead of carrying colours of their own.

use std::fmt;
use std::str::FromStr;

use egui::{Color32, FontFamily, FontId, Margin, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// RGBA colour with straight (unmultiplied) alpha, usable in consts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlassColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl GlassColor {
    pub const WHITE: GlassColor = GlassColor::rgb(255, 255, 255);
    pub const BLACK: GlassColor = GlassColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    /// Same colour with its alpha scaled by `factor` (clamped to 0..=1).
    pub fn faded(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// Fill, text colour and geometry of a flat surface (window, display).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub fill: GlassColor,
    pub text: GlassColor,
    pub rounding: f32,
    pub padding: f32,
}

/// Like [`SurfaceStyle`], plus the fill shown under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub fill: GlassColor,
    pub hover_fill: GlassColor,
    pub text: GlassColor,
    pub rounding: f32,
    pub padding: f32,
}

/// Complete styling for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlassTheme {
    pub window: SurfaceStyle,
    pub button: ButtonStyle,
    pub display: SurfaceStyle,
    /// 1px outline around the window and the display field
    pub border: GlassColor,
    pub display_font_size: f32,
    pub display_margin: f32,
}

impl GlassTheme {
    pub const LIGHT: GlassTheme = GlassTheme {
        window: SurfaceStyle {
            fill: GlassColor::rgba(255, 255, 255, 180),
            text: GlassColor::BLACK,
            rounding: 20.0,
            padding: 8.0,
        },
        button: ButtonStyle {
            fill: GlassColor::rgba(200, 200, 200, 150),
            hover_fill: GlassColor::rgba(220, 220, 220, 150),
            text: GlassColor::BLACK,
            rounding: 5.0,
            padding: 15.0,
        },
        display: SurfaceStyle {
            fill: GlassColor::rgba(255, 255, 255, 150),
            text: GlassColor::BLACK,
            rounding: 10.0,
            padding: 10.0,
        },
        border: GlassColor::rgba(0, 0, 0, 26),
        display_font_size: 24.0,
        display_margin: 10.0,
    };

    pub const DARK: GlassTheme = GlassTheme {
        window: SurfaceStyle {
            fill: GlassColor::rgba(30, 30, 30, 200),
            text: GlassColor::WHITE,
            rounding: 20.0,
            padding: 8.0,
        },
        button: ButtonStyle {
            fill: GlassColor::rgba(50, 50, 50, 150),
            hover_fill: GlassColor::rgba(70, 70, 70, 150),
            text: GlassColor::WHITE,
            rounding: 5.0,
            padding: 15.0,
        },
        display: SurfaceStyle {
            fill: GlassColor::rgba(40, 40, 40, 150),
            text: GlassColor::WHITE,
            rounding: 10.0,
            padding: 10.0,
        },
        border: GlassColor::rgba(255, 255, 255, 26),
        display_font_size: 24.0,
        display_margin: 10.0,
    };

    /// Apply this theme to an egui context.
    ///
    /// Replaces the whole style, so switching themes never leaves
    /// colours from the previous one behind.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_style(self.style(ctx.style().as_ref()));
    }

    /// Build the egui style for this theme on top of `base`.
    pub fn style(&self, base: &Style) -> Style {
        let mut style = base.clone();

        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(18.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.display_font_size, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        ]
        .into();

        let text = self.window.text.to_color32();
        let border = Stroke::new(1.0, self.border.to_color32());

        let mut visuals = if self.window.text == GlassColor::WHITE {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.override_text_color = Some(text);
        visuals.window_fill = self.window.fill.to_color32();
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.faint_bg_color = self.display.fill.to_color32();
        visuals.extreme_bg_color = self.display.fill.to_color32();
        visuals.window_rounding = Rounding::same(self.window.rounding);
        visuals.menu_rounding = Rounding::same(self.button.rounding);
        visuals.window_stroke = border;

        let button = self.button;
        let paint = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, button.text.to_color32());
            ws.rounding = Rounding::same(button.rounding);
        };
        paint(&mut visuals.widgets.inactive, button.fill.to_color32());
        paint(&mut visuals.widgets.hovered, button.hover_fill.to_color32());
        paint(&mut visuals.widgets.active, button.hover_fill.to_color32());
        paint(&mut visuals.widgets.open, button.hover_fill.to_color32());
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text);
        visuals.widgets.noninteractive.bg_stroke = border;

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        style.spacing.button_padding = egui::vec2(button.padding, button.padding * 0.5);
        style
    }

    /// Window frame: translucent fill, rounded, 1px outline.
    pub fn window_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.window.fill.to_color32())
            .stroke(Stroke::new(1.0, self.border.to_color32()))
            .rounding(Rounding::same(self.window.rounding))
            .inner_margin(Margin::same(self.window.padding))
    }

    /// Copy of this theme with every colour's alpha scaled by `opacity`,
    /// which renders the whole window at that opacity.
    pub fn faded(&self, opacity: f32) -> GlassTheme {
        let surface = |s: SurfaceStyle| SurfaceStyle {
            fill: s.fill.faded(opacity),
            text: s.text.faded(opacity),
            ..s
        };
        GlassTheme {
            window: surface(self.window),
            button: ButtonStyle {
                fill: self.button.fill.faded(opacity),
                hover_fill: self.button.hover_fill.faded(opacity),
                text: self.button.text.faded(opacity),
                ..self.button
            },
            display: surface(self.display),
            border: self.border.faded(opacity),
            ..*self
        }
    }
}

/// Which of the two themes is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn theme(self) -> &'static GlassTheme {
        if self.is_dark() {
            &GlassTheme::DARK
        } else {
            &GlassTheme::LIGHT
        }
    }

    /// Toolbar text offering the switch away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌙 Dark Mode",
            ThemeMode::Dark => "☀ Light Mode",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ConfigError::InvalidTheme(other.to_string())),
        }
    }
}

/// Toolbar strip along the top of the window.
pub fn toolbar<R>(
    ui: &mut egui::Ui,
    theme: &GlassTheme,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(theme.display.fill.to_color32())
        .rounding(Rounding::same(theme.button.rounding))
        .inner_margin(Margin::symmetric(6.0, 4.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}
