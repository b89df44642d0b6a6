//! Pixel containers: the immutable off-screen [`bitmap::Bitmap`] and the visible
//! [`surface::DrawingSurface`] it is copied onto every frame.

pub(crate) mod bitmap;
pub(crate) mod surface;
