use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FuzzError, FuzzResult};

/// A captured frame as RGBA8 pixels.
///
/// Frames captured from a surface are **premultiplied alpha**; the flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Grow to even dimensions with transparent pixels (yuv420p needs even sizes).
    pub fn pad_to_even(&self) -> Self {
        let w = self.width + self.width % 2;
        let h = self.height + self.height % 2;
        if w == self.width && h == self.height {
            return self.clone();
        }
        let mut data = vec![0u8; (w as usize) * (h as usize) * 4];
        let src_stride = self.width as usize * 4;
        let dst_stride = w as usize * 4;
        for y in 0..self.height as usize {
            data[y * dst_stride..y * dst_stride + src_stride]
                .copy_from_slice(&self.data[y * src_stride..(y + 1) * src_stride]);
        }
        Self {
            width: w,
            height: h,
            data,
            premultiplied: self.premultiplied,
        }
    }

    /// Straight-alpha copy of the pixel bytes.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Write as a PNG (straight alpha), creating parent directories.
    pub fn save_png(&self, path: &Path) -> FuzzResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| FuzzError::encode(format!("write png '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
