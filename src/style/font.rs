use serde::{Deserialize, Serialize};

use crate::foundation::error::{FuzzError, FuzzResult};
use crate::style::length::{LengthContext, parse_length};

/// Numeric font weight in `1..=1000` (400 normal, 700 bold, 900 black).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FontWeight(pub f32);

impl FontWeight {
    /// `normal`.
    pub const NORMAL: Self = Self(400.0);
    /// `bold`.
    pub const BOLD: Self = Self(700.0);
    /// `black`.
    pub const BLACK: Self = Self(900.0);

    /// Parse a numeric string or CSS keyword.
    pub fn parse(s: &str) -> FuzzResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        let v = match s.as_str() {
            "thin" | "hairline" => 100.0,
            "extralight" | "extra-light" | "ultralight" => 200.0,
            "light" => 300.0,
            "normal" | "regular" => 400.0,
            "medium" => 500.0,
            "semibold" | "semi-bold" | "demibold" => 600.0,
            "bold" => 700.0,
            "extrabold" | "extra-bold" | "ultrabold" => 800.0,
            "black" | "heavy" => 900.0,
            other => other
                .parse::<f32>()
                .map_err(|_| FuzzError::validation(format!("invalid font weight \"{s}\"")))?,
        };
        Self::new(v)
    }

    /// Validate a numeric weight.
    pub fn new(v: f32) -> FuzzResult<Self> {
        if !v.is_finite() || !(1.0..=1000.0).contains(&v) {
            return Err(FuzzError::validation(format!(
                "font weight must be within 1..=1000, got {v}"
            )));
        }
        Ok(Self(v))
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::BLACK
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f32),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Self::new(v).map_err(serde::de::Error::custom),
            Repr::Str(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Requested font size: absolute pixels or a responsive CSS length expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSizeSpec {
    /// Absolute size in pixels.
    Px(f32),
    /// Expression such as `clamp(2rem, 8vw, 8rem)`, resolved at layout time.
    Css(String),
}

impl Default for FontSizeSpec {
    fn default() -> Self {
        Self::Css("clamp(2rem, 8vw, 8rem)".to_owned())
    }
}

impl FontSizeSpec {
    /// Resolve to a pixel size; must be finite and > 0.
    pub fn resolve_px(&self, ctx: &LengthContext) -> FuzzResult<f32> {
        let px = match self {
            Self::Px(v) => *v,
            Self::Css(src) => parse_length(src)?.resolve_px(ctx)? as f32,
        };
        if !px.is_finite() || px <= 0.0 {
            return Err(FuzzError::validation(format!(
                "font size must be finite and > 0, got {px}"
            )));
        }
        Ok(px)
    }

    /// The `font` shorthand fragment for this size (`32px` or the raw expression).
    pub fn css_fragment(&self) -> String {
        match self {
            Self::Px(v) => format!("{v}px"),
            Self::Css(src) => src.trim().to_owned(),
        }
    }
}

/// Requested font family; `"inherit"` defers to the host's enclosing style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontFamilySpec {
    /// Use the family of the enclosing element.
    #[default]
    Inherit,
    /// An explicit family name or generic family.
    Named(String),
}

impl FontFamilySpec {
    /// Resolve against the host-provided inherited family, defaulting to `sans-serif`.
    pub fn resolve<'a>(&'a self, inherited: Option<&'a str>) -> &'a str {
        match self {
            Self::Named(name) => name.as_str(),
            Self::Inherit => inherited
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("sans-serif"),
        }
    }
}

impl Serialize for FontFamilySpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Inherit => serializer.serialize_str("inherit"),
            Self::Named(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for FontFamilySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("inherit") {
            Ok(Self::Inherit)
        } else if trimmed.is_empty() {
            Err(serde::de::Error::custom("font family must not be empty"))
        } else {
            Ok(Self::Named(trimmed.to_owned()))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/font.rs"]
mod tests;
