//! fuzzytext renders "fuzzy" text: the text is rasterized once into an off-screen bitmap, then on
//! every display refresh each row strip of that bitmap is copied onto a visible surface at a random
//! horizontal offset. Jitter intensifies while a pointer hovers over the text.
//!
//! The component is host-driven and single-threaded:
//!
//! - Build a [`FuzzyText`] from a [`RenderConfig`] and [`HostEnv`]
//! - [`mount`](FuzzyText::mount) it against a [`Host`] and a [`TextBackend`]
//! - Deliver [`on_frame`](FuzzyText::on_frame) and [`on_pointer`](FuzzyText::on_pointer) callbacks
//! - [`teardown`](FuzzyText::teardown) when done
//!
//! For offline output, a [`Scenario`] drives the component over a [`VirtualHost`] clock
//! ([`render_frames`], [`render_frame_at`], [`render_to_mp4`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod env;
mod foundation;
mod fuzz;
mod raster;
mod render;
mod scene;
mod style;
mod text;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use crate::foundation::core::{HitRect, IRect, PixelSize, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{FuzzError, FuzzResult};

pub use crate::style::color::parse_css_color;
pub use crate::style::font::{FontFamilySpec, FontSizeSpec, FontWeight};
pub use crate::style::length::{LengthContext, LengthExpr, parse_length};

pub use crate::env::host::{FrameHandle, Host, ListenerId, ListenerKind, PointerEvent};
pub use crate::env::viewport::{HANDHELD_MAX_WIDTH, HostEnv, ViewportInfo, is_handheld_user_agent};
pub use crate::env::virtual_host::VirtualHost;

pub use crate::raster::bitmap::Bitmap;
pub use crate::raster::surface::{DrawingSurface, PixmapSurface};

pub use crate::text::backend::{TextBackend, TextMetrics, TextRequest};
pub use crate::text::fonts::{FontFace, FontRegistry};
pub use crate::text::vello::VelloTextBackend;

pub use crate::fuzz::component::{AnimationState, FrameOutcome, FuzzyText, MountState, MountToken};
pub use crate::fuzz::config::{RenderConfig, ResolvedStyle, SURFACE_CLASS};
pub use crate::fuzz::jitter::{active_intensity, clear_margin, clear_rect, line_offset};
pub use crate::fuzz::layout::{
    EXTRA_WIDTH_BUFFER, HORIZONTAL_MARGIN, LayoutMetrics, VERTICAL_MARGIN,
};
pub use crate::fuzz::profile::MotionProfile;

pub use crate::scene::scenario::{FontSource, MAX_DURATION_MS, PointerAction, PointerCue, Scenario};

pub use crate::render::encode::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{
    InspectReport, Playback, RenderToMp4Opts, inspect, render_frame_at, render_frames,
    render_to_mp4,
};

pub use crate::assets::webp::{ConvertedImage, convert_png, convert_png_tree};
