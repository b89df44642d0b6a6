//! The fuzzy-text component and the pure pieces it is built from.
//!
//! [`component::FuzzyText`] owns one mount at a time: it rasterizes the text once into an
//! immutable off-screen [`Bitmap`](crate::Bitmap), then on every frame callback copies each row
//! strip onto the visible surface at a random horizontal offset. Layout math lives in
//! [`layout`], frame-rate and range selection in [`profile`], and offset/intensity rules in
//! [`jitter`].

pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod jitter;
pub(crate) mod layout;
pub(crate) mod profile;
