//! Glass widgets: translucent rounded buttons and the read-only display

use egui::{Align2, Color32, FontId, Response, Rounding, Sense, Stroke, Ui, Vec2, Widget};

use crate::theme::GlassTheme;

/// A button: translucent fill, rounded corners, lighter under the pointer.
pub struct GlassButton<'a> {
    text: &'a str,
    theme: &'a GlassTheme,
    size: Option<Vec2>,
    font_size: f32,
}

impl<'a> GlassButton<'a> {
    pub fn new(text: &'a str, theme: &'a GlassTheme) -> Self {
        Self {
            text,
            theme,
            size: None,
            font_size: 18.0,
        }
    }

    /// Fixed size instead of sizing to the label.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl<'a> Widget for GlassButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let style = self.theme.button;
        let font = FontId::proportional(self.font_size);
        let desired_size = self.size.unwrap_or_else(|| {
            let galley = ui.painter().layout_no_wrap(
                self.text.to_string(),
                font.clone(),
                style.text.to_color32(),
            );
            galley.size() + Vec2::new(style.padding * 2.0, style.padding)
        });
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if response.hovered() || response.is_pointer_button_down_on() {
                style.hover_fill
            } else {
                style.fill
            };
            painter.rect_filled(rect, Rounding::same(style.rounding), fill.to_color32());
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.text,
                font,
                style.text.to_color32(),
            );
        }

        response
    }
}

/// Longest suffix of `text` that `fits`, prefixed with an ellipsis when
/// anything was cut. The end of the expression is what was typed last, so
/// that is the part kept.
pub fn fit_tail(text: &str, fits: impl Fn(&str) -> bool) -> String {
    if fits(text) {
        return text.to_string();
    }
    for (i, _) in text.char_indices().skip(1) {
        let candidate = format!("…{}", &text[i..]);
        if fits(&candidate) {
            return candidate;
        }
    }
    "…".to_string()
}

/// Read-only, right-aligned display field.
pub fn display_field(ui: &mut Ui, theme: &GlassTheme, text: &str) -> Response {
    let style = theme.display;
    let font = FontId::proportional(theme.display_font_size);
    let height = theme.display_font_size + style.padding * 2.0;

    egui::Frame::none()
        .fill(style.fill.to_color32())
        .stroke(Stroke::new(1.0, theme.border.to_color32()))
        .rounding(Rounding::same(style.rounding))
        .inner_margin(egui::Margin::same(style.padding))
        .outer_margin(egui::Margin::same(theme.display_margin))
        .show(ui, |ui| {
            ui.set_min_height(height - style.padding * 2.0);
            let max_width = ui.available_width();
            let shown = ui.fonts(|f| {
                fit_tail(text, |s| {
                    f.layout_no_wrap(s.to_string(), font.clone(), Color32::PLACEHOLDER)
                        .size()
                        .x
                        <= max_width
                })
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(shown)
                        .font(font)
                        .color(style.text.to_color32()),
                );
            });
        })
        .response
}
