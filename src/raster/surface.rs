use crate::foundation::core::{IRect, PixelSize};
use crate::foundation::math::premul_over;
use crate::raster::bitmap::Bitmap;
use crate::render::frame::FrameRGBA;

/// Minimal 2D drawing capability the renderer needs from a visible surface.
///
/// Coordinates passed to [`clear_rect`](Self::clear_rect) and
/// [`draw_image`](Self::draw_image) are in the translated space set up by
/// [`translate`](Self::translate); implementations clip to their own bounds.
pub trait DrawingSurface {
    /// Intrinsic pixel size.
    fn size(&self) -> PixelSize;

    /// Shift the drawing origin by `(dx, dy)` (cumulative).
    fn translate(&mut self, dx: i32, dy: i32);

    /// Reset the pixels under `rect` to transparent.
    fn clear_rect(&mut self, rect: IRect);

    /// Composite `src_rect` of `src` (source-over, unscaled) with its top-left at `(dst_x, dst_y)`.
    fn draw_image(&mut self, src: &Bitmap, src_rect: IRect, dst_x: i32, dst_y: i32);
}

/// CPU surface backed by a `vello_cpu` pixmap.
pub struct PixmapSurface {
    pixmap: vello_cpu::Pixmap,
    origin: (i32, i32),
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("size", &self.size())
            .field("origin", &self.origin)
            .finish()
    }
}

impl PixmapSurface {
    /// Allocate a transparent surface; `None` when a dimension is zero or exceeds `u16`.
    pub fn allocate(size: PixelSize) -> Option<Self> {
        if size.is_empty() {
            return None;
        }
        let w = u16::try_from(size.width).ok()?;
        let h = u16::try_from(size.height).ok()?;
        Some(Self {
            pixmap: vello_cpu::Pixmap::new(w, h),
            origin: (0, 0),
        })
    }

    /// Current translation.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Alpha at untranslated pixel `(x, y)`, zero outside.
    pub fn alpha_at(&self, x: i64, y: i64) -> u8 {
        let size = self.size();
        if x < 0 || y < 0 || x >= i64::from(size.width) || y >= i64::from(size.height) {
            return 0;
        }
        self.data()[(y as usize * size.width as usize + x as usize) * 4 + 3]
    }

    /// Copy the current pixels out as a frame.
    pub fn to_frame(&self) -> FrameRGBA {
        let size = self.size();
        FrameRGBA {
            width: size.width,
            height: size.height,
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }

    fn device_rect(&self, rect: IRect) -> Option<IRect> {
        rect.offset(self.origin.0, self.origin.1)
            .clip_to(self.size())
    }
}

impl DrawingSurface for PixmapSurface {
    fn size(&self) -> PixelSize {
        PixelSize::new(
            u32::from(self.pixmap.width()),
            u32::from(self.pixmap.height()),
        )
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }

    fn clear_rect(&mut self, rect: IRect) {
        let Some(r) = self.device_rect(rect) else {
            return;
        };
        let stride = self.size().width as usize * 4;
        let data = self.pixmap.data_as_u8_slice_mut();
        for y in r.y..r.bottom() {
            let start = y as usize * stride + r.x as usize * 4;
            data[start..start + r.width as usize * 4].fill(0);
        }
    }

    fn draw_image(&mut self, src: &Bitmap, src_rect: IRect, dst_x: i32, dst_y: i32) {
        let Some(src_rect) = src_rect.clip_to(src.size()) else {
            return;
        };
        let dst = IRect::new(dst_x, dst_y, src_rect.width, src_rect.height);
        let Some(clipped) = self.device_rect(dst) else {
            return;
        };

        // Map the clipped device rect back into source coordinates.
        let sx0 = src_rect.x + (clipped.x - dst_x.saturating_add(self.origin.0));
        let sy0 = src_rect.y + (clipped.y - dst_y.saturating_add(self.origin.1));

        let stride = self.size().width as usize * 4;
        let data = self.pixmap.data_as_u8_slice_mut();
        for row in 0..clipped.height {
            let src_row = src.row((sy0 + row) as u32);
            let s_start = sx0 as usize * 4;
            let src_px = &src_row[s_start..s_start + clipped.width as usize * 4];
            let d_start = (clipped.y + row) as usize * stride + clipped.x as usize * 4;
            let dst_px = &mut data[d_start..d_start + clipped.width as usize * 4];
            for (d, s) in dst_px.chunks_exact_mut(4).zip(src_px.chunks_exact(4)) {
                premul_over(d, s);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
