use std::sync::LazyLock;

use regex::Regex;

use crate::style::length::LengthContext;

/// Viewport widths below this use the reduced-resource profile.
pub const HANDHELD_MAX_WIDTH: f64 = 768.0;

static HANDHELD_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("handheld user-agent pattern is valid")
});

/// Viewport facts the host passes in explicitly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportInfo {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Root font size used by `rem` units.
    pub root_font_px: f64,
    /// Whether the device is a phone/tablet class device.
    pub is_handheld: bool,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            root_font_px: 16.0,
            is_handheld: false,
        }
    }
}

impl ViewportInfo {
    /// Desktop-class viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Viewport whose handheld flag is derived from a user-agent string.
    pub fn from_user_agent(width: f64, height: f64, user_agent: &str) -> Self {
        Self {
            is_handheld: is_handheld_user_agent(user_agent),
            ..Self::new(width, height)
        }
    }

    /// Small-viewport or handheld condition.
    pub fn reduced_resource(&self) -> bool {
        self.is_handheld || self.width < HANDHELD_MAX_WIDTH
    }

    /// Length context for font sizes declared on an element directly under the root.
    pub fn length_context(&self) -> LengthContext {
        LengthContext {
            viewport_width: self.width,
            viewport_height: self.height,
            root_font_px: self.root_font_px,
            parent_font_px: self.root_font_px,
        }
    }
}

/// Case-insensitive match against common phone/tablet user agents.
pub fn is_handheld_user_agent(user_agent: &str) -> bool {
    HANDHELD_UA.is_match(user_agent)
}

/// Everything the component reads from its surroundings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostEnv {
    /// Viewport used for responsive sizing and profile selection.
    #[serde(default)]
    pub viewport: ViewportInfo,
    /// Computed font family of the element enclosing the surface.
    #[serde(default)]
    pub inherited_font_family: Option<String>,
}

impl HostEnv {
    /// Environment with no inherited family.
    pub fn new(viewport: ViewportInfo) -> Self {
        Self {
            viewport,
            inherited_font_family: None,
        }
    }

    /// Set the inherited family.
    pub fn with_inherited_family(mut self, family: impl Into<String>) -> Self {
        self.inherited_font_family = Some(family.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/viewport.rs"]
mod tests;
