use crate::foundation::core::IRect;
use crate::fuzz::config::RenderConfig;
use crate::fuzz::layout::LayoutMetrics;
use crate::fuzz::profile::MotionProfile;

/// Intensity for the current frame.
pub fn active_intensity(config: &RenderConfig, hovering: bool, profile: &MotionProfile) -> f32 {
    if hovering && config.enable_hover {
        config.hover_intensity
    } else {
        config.base_intensity * profile.idle_scale
    }
}

/// Horizontal offset for one strip from a uniform sample `u` in `[0, 1)`.
///
/// Truncation keeps `|dx| <= 0.5 * intensity * fuzz_range`.
pub fn line_offset(intensity: f32, fuzz_range: u32, u: f32) -> i32 {
    (intensity * (u - 0.5) * fuzz_range as f32).trunc() as i32
}

/// How far the per-frame clear must reach past the off-screen footprint.
pub fn clear_margin(config: &RenderConfig, profile: &MotionProfile) -> i32 {
    let max_intensity = config.base_intensity.max(config.hover_intensity);
    let reach = (0.5 * max_intensity * profile.fuzz_range as f32).ceil();
    (profile.fuzz_range as i32).max(reach as i32)
}

/// Area cleared before each draw, in translated surface coordinates.
///
/// The reach is capped at the surface size; past that the whole surface is already covered.
pub fn clear_rect(layout: &LayoutMetrics, config: &RenderConfig, profile: &MotionProfile) -> IRect {
    let cap = layout.surface.width.max(layout.surface.height).min(i32::MAX as u32) as i32;
    IRect::new(
        0,
        0,
        layout.offscreen.width as i32,
        layout.offscreen.height as i32,
    )
    .inflate(clear_margin(config, profile).min(cap))
}

#[cfg(test)]
#[path = "../../tests/unit/fuzz/jitter.rs"]
mod tests;
