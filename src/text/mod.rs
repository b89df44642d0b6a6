//! Text measurement and rasterization.
//!
//! [`backend::TextBackend`] is the seam the renderer measures and rasterizes through;
//! [`vello::VelloTextBackend`] implements it with `parley` shaping and `vello_cpu` glyph fills over
//! fonts registered up front in a [`fonts::FontRegistry`].

pub(crate) mod backend;
pub(crate) mod fonts;
pub(crate) mod vello;
