//! Theme-change fade.
//!
//! When the theme flips, the window dims from full opacity down to
//! [`FADE_FLOOR`] over [`FADE_DURATION`], then the new theme is applied
//! and opacity snaps back to 1.0. Purely cosmetic: nothing waits on it.
//! Callers render the opacity with [`crate::GlassTheme::faded`].

/// Default length of the fade in seconds.
pub const FADE_DURATION: f32 = 0.3;

/// Opacity reached at the end of the fade.
pub const FADE_FLOOR: f32 = 0.7;

/// State of a running fade
#[derive(Debug, Clone)]
pub struct FadeAnimation {
    /// Total length in seconds
    duration: f32,
    /// Progress (0.0 to 1.0)
    progress: f32,
    completed: bool,
}

impl Default for FadeAnimation {
    fn default() -> Self {
        Self::new(FADE_DURATION)
    }
}

impl FadeAnimation {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            progress: 0.0,
            completed: false,
        }
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress += dt.max(0.0) / self.duration;
        }
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.completed = true;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Current window opacity.
    pub fn opacity(&self) -> f32 {
        if self.completed {
            return 1.0;
        }
        lerp(1.0, FADE_FLOOR, ease_in_out_quad(self.progress))
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in-out: slow start, slow finish.
fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_easing_endpoints() {
        assert!(close(ease_in_out_quad(0.0), 0.0));
        assert!(close(ease_in_out_quad(0.5), 0.5));
        assert!(close(ease_in_out_quad(1.0), 1.0));
        assert!(ease_in_out_quad(0.25) < 0.25);
        assert!(ease_in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn test_fade_dims_then_restores() {
        let mut fade = FadeAnimation::new(0.3);
        assert!(close(fade.opacity(), 1.0));

        fade.update(0.15);
        assert!(close(fade.opacity(), 0.85));
        assert!(!fade.is_complete());

        fade.update(0.1499);
        assert!(fade.opacity() < 0.71);

        fade.update(0.1);
        assert!(fade.is_complete());
        assert!(close(fade.opacity(), 1.0));
    }

    #[test]
    fn test_zero_duration_completes_at_once() {
        let mut fade = FadeAnimation::new(0.0);
        fade.update(0.0);
        assert!(fade.is_complete());
        assert!(close(fade.opacity(), 1.0));
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut fade = FadeAnimation::default();
        fade.update(-1.0);
        assert!(!fade.is_complete());
        assert!(close(fade.opacity(), 1.0));
    }
}
