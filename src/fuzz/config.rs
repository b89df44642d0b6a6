use serde::{Deserialize, Serialize};

use crate::env::viewport::HostEnv;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{FuzzError, FuzzResult};
use crate::style::color::parse_css_color;
use crate::style::font::{FontFamilySpec, FontSizeSpec, FontWeight};
use crate::text::backend::TextRequest;

/// Class every visible surface carries.
pub const SURFACE_CLASS: &str = "fuzzy-text-canvas";

fn default_color() -> String {
    "#fff".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_base_intensity() -> f32 {
    0.18
}

fn default_hover_intensity() -> f32 {
    0.5
}

/// Everything a mount is rendered from. Any change starts a fresh mount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Text to draw.
    pub text: String,
    /// Pixel size or CSS length expression.
    #[serde(default)]
    pub font_size: FontSizeSpec,
    /// Numeric weight or keyword.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Family name, or `inherit`.
    #[serde(default)]
    pub font_family: FontFamilySpec,
    /// CSS color.
    #[serde(default = "default_color")]
    pub color: String,
    /// Whether pointer/touch hover raises intensity.
    #[serde(default = "default_true")]
    pub enable_hover: bool,
    /// Idle intensity.
    #[serde(default = "default_base_intensity")]
    pub base_intensity: f32,
    /// Intensity while hovered.
    #[serde(default = "default_hover_intensity")]
    pub hover_intensity: f32,
    /// Extra classes for the surface element.
    #[serde(default)]
    pub class_name: String,
}

impl RenderConfig {
    /// Defaults for everything but the text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: FontSizeSpec::default(),
            font_weight: FontWeight::default(),
            font_family: FontFamilySpec::default(),
            color: default_color(),
            enable_hover: true,
            base_intensity: default_base_intensity(),
            hover_intensity: default_hover_intensity(),
            class_name: String::new(),
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: FontSizeSpec) -> Self {
        self.font_size = size;
        self
    }

    /// Set the weight.
    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set the family.
    pub fn with_font_family(mut self, family: FontFamilySpec) -> Self {
        self.font_family = family;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Enable or disable hover.
    pub fn with_hover(mut self, enabled: bool) -> Self {
        self.enable_hover = enabled;
        self
    }

    /// Set idle and hover intensities.
    pub fn with_intensities(mut self, base: f32, hover: f32) -> Self {
        self.base_intensity = base;
        self.hover_intensity = hover;
        self
    }

    /// Set extra surface classes.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Reject values that could never render.
    pub fn validate(&self) -> FuzzResult<()> {
        for (name, v) in [
            ("base_intensity", self.base_intensity),
            ("hover_intensity", self.hover_intensity),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FuzzError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        FontWeight::new(self.font_weight.0)?;
        parse_css_color(&self.color)?;
        match &self.font_size {
            FontSizeSpec::Px(v) if !v.is_finite() || *v <= 0.0 => {
                return Err(FuzzError::validation(format!(
                    "font_size must be finite and > 0, got {v}"
                )));
            }
            FontSizeSpec::Px(_) => {}
            FontSizeSpec::Css(src) => {
                crate::style::length::parse_length(src)?;
            }
        }
        Ok(())
    }

    /// Class list of the surface element.
    pub fn css_class(&self) -> String {
        format!("{SURFACE_CLASS} {}", self.class_name.trim())
            .trim_end()
            .to_owned()
    }

    /// CSS `font` shorthand as declared (unresolved size and family).
    pub fn font_shorthand(&self) -> String {
        let family = match &self.font_family {
            FontFamilySpec::Inherit => "inherit",
            FontFamilySpec::Named(name) => name.as_str(),
        };
        format!(
            "{} {} {}",
            self.font_weight.0,
            self.font_size.css_fragment(),
            family
        )
    }

    /// Resolve size, family, and color against the host environment.
    pub fn resolve(&self, env: &HostEnv) -> FuzzResult<ResolvedStyle> {
        let size_px = self
            .font_size
            .resolve_px(&env.viewport.length_context())?;
        let family = self
            .font_family
            .resolve(env.inherited_font_family.as_deref())
            .to_owned();
        let color = parse_css_color(&self.color)?;
        Ok(ResolvedStyle {
            family,
            weight: self.font_weight,
            size_px,
            color,
        })
    }
}

/// Concrete font and color for one mount.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedStyle {
    /// Family name or stack.
    pub family: String,
    /// Weight.
    pub weight: FontWeight,
    /// Size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgba8,
}

impl ResolvedStyle {
    /// Shaping request for `text` in this style.
    pub fn request<'a>(&'a self, text: &'a str) -> TextRequest<'a> {
        TextRequest {
            text,
            family: &self.family,
            weight: self.weight,
            size_px: self.size_px,
            color: self.color,
        }
    }

    /// Resolved CSS `font` shorthand.
    pub fn font_shorthand(&self) -> String {
        format!("{} {}px {}", self.weight.0, self.size_px, self.family)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fuzz/config.rs"]
mod tests;
