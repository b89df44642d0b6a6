use crate::foundation::core::Rgba8;
use crate::fuzz::layout::LayoutMetrics;
use crate::raster::bitmap::Bitmap;
use crate::style::font::FontWeight;

/// Everything needed to shape one run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRequest<'a> {
    /// The string to draw.
    pub text: &'a str,
    /// Resolved family name or comma-separated stack.
    pub family: &'a str,
    /// Font weight.
    pub weight: FontWeight,
    /// Resolved font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgba8,
}

/// Tight ink bounds of shaped text, relative to its alignment point on the alphabetic baseline.
///
/// `left` is positive when ink extends left of the alignment point; `ascent`/`descent` are the
/// distances above/below the baseline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextMetrics {
    /// Distance from the alignment point to the left ink edge.
    pub left: f64,
    /// Distance from the alignment point to the right ink edge.
    pub right: f64,
    /// Ink extent above the baseline.
    pub ascent: f64,
    /// Ink extent below the baseline.
    pub descent: f64,
    /// Advance width.
    pub width: f64,
}

impl TextMetrics {
    /// Estimates used when nothing is inked (blank text) or the backend omits bounds.
    pub fn fallback(width: f64, size_px: f32) -> Self {
        let size = f64::from(size_px);
        Self {
            left: 0.0,
            right: width,
            ascent: size,
            descent: size * 0.2,
            width,
        }
    }
}

/// Measurement and off-screen rasterization capability.
///
/// Both methods return `None` when the environment cannot serve the request (no usable font, a
/// raster that cannot be allocated); the renderer treats that as "draw nothing".
pub trait TextBackend {
    /// Measure tight ink bounds.
    fn measure(&mut self, req: &TextRequest<'_>) -> Option<TextMetrics>;

    /// Rasterize into a bitmap of `layout.offscreen` size, ink starting at `layout.x_offset` and the
    /// baseline at `layout.text.ascent`.
    fn rasterize(&mut self, req: &TextRequest<'_>, layout: &LayoutMetrics) -> Option<Bitmap>;
}
