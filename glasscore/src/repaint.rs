//! Frame pacing for the calculator window.
//!
//! egui only repaints when input arrives. That is fine while the window
//! sits idle, but a fade needs frames of its own. `RepaintController`
//! measures the time between frames and, while continuous mode is on,
//! keeps frames coming at a fixed interval.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()` and
//! [`RepaintController::end_frame`] at the bottom.

use std::time::{Duration, Instant};

/// Frame interval while an animation runs (~60 Hz).
const ANIMATION_INTERVAL: Duration = Duration::from_millis(16);

/// Longest frame delta handed to animations. A window that slept for a
/// minute should not skip a fade in one step.
const MAX_FRAME_DELTA: f32 = 0.1;

pub struct RepaintController {
    continuous: bool,
    interval: Duration,
    last_frame: Option<Instant>,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            interval: ANIMATION_INTERVAL,
            last_frame: None,
        }
    }

    /// Keep requesting frames until switched off again.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Start a frame. Returns the seconds since the previous one, capped at
    /// `MAX_FRAME_DELTA`; 0.0 on the first frame.
    pub fn begin_frame(&mut self, _ctx: &egui::Context) -> f32 {
        self.tick(Instant::now())
    }

    /// Finish a frame, scheduling the next one when continuous.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.continuous {
            ctx.request_repaint_after(self.interval);
        }
    }

    fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last_frame {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        dt.min(MAX_FRAME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut rc = RepaintController::new();
        assert_eq!(rc.tick(Instant::now()), 0.0);
    }

    #[test]
    fn test_tick_measures_and_caps() {
        let mut rc = RepaintController::new();
        let start = Instant::now();
        rc.tick(start);
        let dt = rc.tick(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-4);
        let dt = rc.tick(start + Duration::from_secs(60));
        assert_eq!(dt, MAX_FRAME_DELTA);
    }
}
