use serde::Serialize;

use crate::env::viewport::ViewportInfo;

/// Frame-rate and jitter parameters chosen from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotionProfile {
    /// Minimum time between draws; zero draws on every refresh.
    pub frame_interval_ms: f64,
    /// Horizontal jitter range in pixels at intensity 1.
    pub fuzz_range: u32,
    /// Rows per strip.
    pub line_step: u32,
    /// Multiplier applied to the idle intensity.
    pub idle_scale: f32,
}

impl MotionProfile {
    /// Desktop profile.
    pub const NORMAL: Self = Self {
        frame_interval_ms: 0.0,
        fuzz_range: 30,
        line_step: 1,
        idle_scale: 1.0,
    };

    /// Handheld / small-viewport profile (~15 fps).
    pub const REDUCED: Self = Self {
        frame_interval_ms: 67.0,
        fuzz_range: 15,
        line_step: 2,
        idle_scale: 0.5,
    };

    /// Profile for `viewport`.
    pub fn for_viewport(viewport: &ViewportInfo) -> Self {
        if viewport.reduced_resource() {
            Self::REDUCED
        } else {
            Self::NORMAL
        }
    }

    /// Whether a refresh at `now_ms` may draw, given the previous draw time.
    pub fn should_draw(&self, last_draw_ms: Option<f64>, now_ms: f64) -> bool {
        match last_draw_ms {
            None => true,
            Some(_) if self.frame_interval_ms <= 0.0 => true,
            Some(last) => now_ms - last >= self.frame_interval_ms,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fuzz/profile.rs"]
mod tests;
