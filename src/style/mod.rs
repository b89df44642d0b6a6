//! Style values the renderer consumes: colors, font weights/sizes/families, and length expressions.

pub(crate) mod color;
pub(crate) mod font;
pub(crate) mod length;
mod lexer;
