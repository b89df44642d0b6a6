use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::host::PointerEvent;
use crate::env::viewport::{HostEnv, ViewportInfo, is_handheld_user_agent};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{FuzzError, FuzzResult};
use crate::fuzz::config::RenderConfig;
use crate::style::color::parse_css_color;
use crate::style::font::FontWeight;
use crate::text::fonts::FontRegistry;
use crate::text::vello::VelloTextBackend;

fn default_fps() -> u32 {
    60
}

fn default_duration_ms() -> u64 {
    1000
}

fn default_background() -> String {
    "#12141c".to_owned()
}

/// A font file to register before rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSource {
    /// Path, relative to the scenario file unless absolute.
    pub path: PathBuf,
    /// Declared weight of the face; `normal` when omitted.
    #[serde(default)]
    pub weight: Option<FontWeight>,
}

/// Longest clip a scenario may describe (one hour).
pub const MAX_DURATION_MS: u64 = 3_600_000;

/// Pointer input at a point in the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerCue {
    /// Time the input arrives.
    pub at_ms: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: PointerAction,
}

/// Scripted pointer input, in client coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerAction {
    /// Pointer moves to `(x, y)`.
    Move {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer leaves the surface.
    Leave,
    /// A single touch moves to `(x, y)`.
    TouchMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Touch ends.
    TouchEnd,
}

impl PointerAction {
    /// Event delivered to the component.
    pub fn to_event(&self) -> PointerEvent {
        match *self {
            Self::Move { x, y } => PointerEvent::Move {
                client: Point::new(x, y),
            },
            Self::Leave => PointerEvent::Leave,
            Self::TouchMove { x, y } => PointerEvent::TouchMove {
                touches: vec![Point::new(x, y)],
            },
            Self::TouchEnd => PointerEvent::TouchEnd,
        }
    }
}

/// Everything needed to render a fuzzy-text clip offline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Component configuration.
    pub config: RenderConfig,
    /// Viewport the component lays out against.
    #[serde(default)]
    pub viewport: ViewportInfo,
    /// When set, marks the viewport handheld if it matches a phone/tablet agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Family `inherit` resolves to.
    #[serde(default)]
    pub inherited_font_family: Option<String>,
    /// Fonts to register.
    #[serde(default)]
    pub fonts: Vec<FontSource>,
    /// Display refresh rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Clip length.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Jitter seed.
    #[serde(default)]
    pub seed: u64,
    /// When the host reports fonts loaded.
    #[serde(default)]
    pub fonts_ready_at_ms: u64,
    /// Scripted pointer input.
    #[serde(default)]
    pub pointer: Vec<PointerCue>,
    /// Client position of the surface's top-left corner.
    #[serde(default)]
    pub surface_origin: Point,
    /// Flattening color for opaque outputs.
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Scenario {
    /// Scenario with defaults for everything but the config.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            viewport: ViewportInfo::default(),
            user_agent: None,
            inherited_font_family: None,
            fonts: Vec::new(),
            fps: default_fps(),
            duration_ms: default_duration_ms(),
            seed: 0,
            fonts_ready_at_ms: 0,
            pointer: Vec::new(),
            surface_origin: Point::ZERO,
            background: default_background(),
            base_dir: None,
        }
    }

    /// Parse from a JSON reader; font paths resolve against the working directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> FuzzResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FuzzError::serde(format!("parse scenario JSON: {e}")))
    }

    /// Parse from a JSON file; font paths resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> FuzzResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FuzzError::validation(format!("open scenario JSON '{}': {e}", path.display()))
        })?;
        let mut scenario = Self::from_reader(BufReader::new(f))?;
        scenario.base_dir = path.parent().map(Path::to_path_buf);
        Ok(scenario)
    }

    /// Check every field before rendering.
    pub fn validate(&self) -> FuzzResult<()> {
        self.config.validate()?;
        if self.fps == 0 || self.fps > 240 {
            return Err(FuzzError::validation(format!(
                "fps must be within 1..=240, got {}",
                self.fps
            )));
        }
        if self.duration_ms == 0 || self.duration_ms > MAX_DURATION_MS {
            return Err(FuzzError::validation(format!(
                "duration_ms must be within 1..={MAX_DURATION_MS}, got {}",
                self.duration_ms
            )));
        }
        let vp = &self.viewport;
        for (name, v) in [
            ("viewport.width", vp.width),
            ("viewport.height", vp.height),
            ("viewport.root_font_px", vp.root_font_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FuzzError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if !self.surface_origin.is_finite() {
            return Err(FuzzError::validation("surface_origin must be finite"));
        }
        self.background_rgba()?;
        Ok(())
    }

    /// Refresh ticks in the clip (at least one).
    pub fn frame_count(&self) -> u64 {
        self.duration_ms
            .saturating_mul(u64::from(self.fps))
            .div_ceil(1000)
            .max(1)
    }

    /// Timestamp of refresh tick `i`.
    pub fn tick_ms(&self, i: u64) -> f64 {
        i as f64 * 1000.0 / f64::from(self.fps)
    }

    /// Tick at or before `time_ms`.
    pub fn tick_at(&self, time_ms: f64) -> u64 {
        (time_ms.max(0.0) * f64::from(self.fps) / 1000.0).floor() as u64
    }

    /// Host environment the component sees.
    pub fn host_env(&self) -> HostEnv {
        let mut viewport = self.viewport;
        if let Some(ua) = &self.user_agent {
            viewport.is_handheld |= is_handheld_user_agent(ua);
        }
        HostEnv {
            viewport,
            inherited_font_family: self.inherited_font_family.clone(),
        }
    }

    /// Parsed background color.
    pub fn background_rgba(&self) -> FuzzResult<Rgba8> {
        parse_css_color(&self.background)
    }

    /// Where a declared font file lives on disk.
    pub fn font_path(&self, source: &FontSource) -> PathBuf {
        match &self.base_dir {
            Some(dir) if source.path.is_relative() => dir.join(&source.path),
            _ => source.path.clone(),
        }
    }

    /// Register every declared font.
    pub fn load_fonts(&self) -> FuzzResult<FontRegistry> {
        let mut registry = FontRegistry::new();
        for source in &self.fonts {
            registry.register_file(&self.font_path(source), source.weight)?;
        }
        Ok(registry)
    }

    /// Text backend over the declared fonts.
    pub fn text_backend(&self) -> FuzzResult<VelloTextBackend> {
        Ok(VelloTextBackend::new(self.load_fonts()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scenario.rs"]
mod tests;
