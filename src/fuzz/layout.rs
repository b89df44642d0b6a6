use serde::Serialize;

use crate::foundation::core::{HitRect, PixelSize};
use crate::text::backend::TextMetrics;

/// Extra off-screen width so jittered edges are not clipped.
pub const EXTRA_WIDTH_BUFFER: u32 = 10;
/// Horizontal margin around the off-screen footprint on the visible surface.
pub const HORIZONTAL_MARGIN: u32 = 50;
/// Vertical margin around the off-screen footprint on the visible surface.
pub const VERTICAL_MARGIN: u32 = 0;

/// Geometry derived once per mount from measured text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Resolved font size.
    pub font_size_px: f32,
    /// Measured ink bounds.
    pub text: TextMetrics,
    /// `ceil(left + right)`.
    pub bounding_width: u32,
    /// `ceil(ascent + descent)`.
    pub tight_height: u32,
    /// Off-screen raster size.
    pub offscreen: PixelSize,
    /// Column where ink starts inside the off-screen raster.
    pub x_offset: i32,
    /// Horizontal translation applied to the visible surface.
    pub horizontal_margin: i32,
    /// Vertical translation applied to the visible surface.
    pub vertical_margin: i32,
    /// Visible surface size.
    pub surface: PixelSize,
    /// Hover region in untranslated surface coordinates.
    pub hit_rect: HitRect,
}

impl LayoutMetrics {
    /// Derive the layout; `None` when the metrics are not finite or the text has no height.
    pub fn compute(text: TextMetrics, font_size_px: f32) -> Option<Self> {
        let ink_w = text.left + text.right;
        let ink_h = text.ascent + text.descent;
        if !ink_w.is_finite() || !ink_h.is_finite() || ink_h <= 0.0 {
            return None;
        }
        let bounding_width = ink_w.max(0.0).ceil() as u32;
        let tight_height = ink_h.ceil() as u32;

        let offscreen = PixelSize::new(bounding_width + EXTRA_WIDTH_BUFFER, tight_height);
        let x_offset = (EXTRA_WIDTH_BUFFER / 2) as i32;
        let surface = PixelSize::new(
            offscreen.width + 2 * HORIZONTAL_MARGIN,
            tight_height + 2 * VERTICAL_MARGIN,
        );

        let left = f64::from(HORIZONTAL_MARGIN) + f64::from(x_offset);
        let top = f64::from(VERTICAL_MARGIN);
        let hit_rect = HitRect {
            left,
            top,
            right: left + f64::from(bounding_width),
            bottom: top + f64::from(tight_height),
        };

        Some(Self {
            font_size_px,
            text,
            bounding_width,
            tight_height,
            offscreen,
            x_offset,
            horizontal_margin: HORIZONTAL_MARGIN as i32,
            vertical_margin: VERTICAL_MARGIN as i32,
            surface,
            hit_rect,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fuzz/layout.rs"]
mod tests;
