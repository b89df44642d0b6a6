use std::sync::Arc;

use crate::foundation::core::PixelSize;

/// Read-only premultiplied RGBA8 raster.
///
/// Pixels live behind an `Arc` and are never mutated after construction, so clones share storage
/// and a fresh rasterization is always a distinct allocation.
#[derive(Clone)]
pub struct Bitmap {
    size: PixelSize,
    data: Arc<[u8]>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .field("data_ptr", &Arc::as_ptr(&self.data))
            .finish()
    }
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 bytes; `None` if the length does not match `size`.
    pub fn from_premul(size: PixelSize, data: Vec<u8>) -> Option<Self> {
        if size.is_empty() || data.len() != size.rgba8_len() {
            return None;
        }
        Some(Self {
            size,
            data: data.into(),
        })
    }

    /// Copy the contents of a rendered `vello_cpu` pixmap.
    pub fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Option<Self> {
        let size = PixelSize::new(u32::from(pixmap.width()), u32::from(pixmap.height()));
        Self::from_premul(size, pixmap.data_as_u8_slice().to_vec())
    }

    /// Dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// All pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.size.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Alpha of pixel `(x, y)`, zero outside the bitmap.
    pub fn alpha_at(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.size.width) || y >= i64::from(self.size.height) {
            return 0;
        }
        self.data[(y as usize * self.size.width as usize + x as usize) * 4 + 3]
    }

    /// Whether both bitmaps share the same pixel storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}
