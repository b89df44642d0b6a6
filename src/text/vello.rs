use std::borrow::Cow;

use crate::foundation::core::{PixelSize, Rgba8};
use crate::fuzz::layout::LayoutMetrics;
use crate::raster::bitmap::Bitmap;
use crate::text::backend::{TextBackend, TextMetrics, TextRequest};
use crate::text::fonts::FontRegistry;

/// [`TextBackend`] that shapes with `parley` and fills glyphs with `vello_cpu`.
///
/// Ink bounds are measured by rendering into a padded scratch pixmap and scanning alpha, so they
/// reflect the actual outlines rather than font-wide ascent/descent.
pub struct VelloTextBackend {
    registry: FontRegistry,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl std::fmt::Debug for VelloTextBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelloTextBackend")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

struct Shaped {
    layout: parley::Layout<Rgba8>,
    font: vello_cpu::peniko::FontData,
    baseline: f64,
}

impl VelloTextBackend {
    /// Backend over the given fonts.
    pub fn new(registry: FontRegistry) -> Self {
        Self {
            registry,
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Registered fonts.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    fn shape(&mut self, req: &TextRequest<'_>) -> Option<Shaped> {
        if !req.size_px.is_finite() || req.size_px <= 0.0 {
            return None;
        }
        let face = self.registry.resolve(req.family, req.weight)?;

        // Only the chosen face is visible to shaping so fallback never picks an unrelated font.
        let mut font_ctx = parley::FontContext::default();
        font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.as_ref().clone()), None);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut font_ctx, req.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(req.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(req.weight.0),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(req.color));

        let mut layout: parley::Layout<Rgba8> = builder.build(req.text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(f64::from(req.size_px));

        Some(Shaped {
            layout,
            font: face.data.clone(),
            baseline,
        })
    }
}

fn paint_layout(
    ctx: &mut vello_cpu::RenderContext,
    shaped: &Shaped,
    dx: f64,
    dy: f64,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));
    for line in shaped.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&shaped.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn render_pixmap(size: PixelSize, shaped: &Shaped, dx: f64, dy: f64) -> Option<vello_cpu::Pixmap> {
    if size.is_empty() {
        return None;
    }
    let w = u16::try_from(size.width).ok()?;
    let h = u16::try_from(size.height).ok()?;
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    paint_layout(&mut ctx, shaped, dx, dy);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Some(pixmap)
}

/// Inclusive pixel bounds `(x0, y0, x1, y1)` of every non-transparent pixel.
pub(crate) fn alpha_bounds(data: &[u8], width: u32) -> Option<(u32, u32, u32, u32)> {
    if width == 0 {
        return None;
    }
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (i, px) in data.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

impl TextBackend for VelloTextBackend {
    #[tracing::instrument(level = "debug", skip(self), fields(text = req.text, size = req.size_px))]
    fn measure(&mut self, req: &TextRequest<'_>) -> Option<TextMetrics> {
        let shaped = self.shape(req)?;
        let width = f64::from(shaped.layout.width());

        let pad = (f64::from(req.size_px) * 0.5).ceil() + 2.0;
        let size = PixelSize::new(
            (width.ceil() + 2.0 * pad) as u32,
            (f64::from(shaped.layout.height()).ceil() + 2.0 * pad) as u32,
        );
        let Some(scratch) = render_pixmap(size, &shaped, pad, pad) else {
            tracing::debug!(?size, "scratch pixmap unavailable; using estimated bounds");
            return Some(TextMetrics::fallback(width, req.size_px));
        };

        let Some((x0, y0, x1, y1)) = alpha_bounds(scratch.data_as_u8_slice(), size.width) else {
            return Some(TextMetrics::fallback(width, req.size_px));
        };

        let baseline_y = pad + shaped.baseline;
        Some(TextMetrics {
            left: pad - f64::from(x0),
            right: f64::from(x1) + 1.0 - pad,
            ascent: baseline_y - f64::from(y0),
            descent: f64::from(y1) + 1.0 - baseline_y,
            width,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, layout), fields(text = req.text))]
    fn rasterize(&mut self, req: &TextRequest<'_>, layout: &LayoutMetrics) -> Option<Bitmap> {
        let shaped = self.shape(req)?;
        let dx = f64::from(layout.x_offset) + layout.text.left;
        let dy = layout.text.ascent - shaped.baseline;
        let pixmap = render_pixmap(layout.offscreen, &shaped, dx, dy)?;
        Bitmap::from_pixmap(&pixmap)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/vello.rs"]
mod tests;
