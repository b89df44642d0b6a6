use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{FuzzError, FuzzResult};
use crate::style::font::FontWeight;

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "math",
    "emoji",
];

/// One registered font face.
#[derive(Clone)]
pub struct FontFace {
    /// Family name read from the font data.
    pub family: String,
    /// Declared weight of this face.
    pub weight: FontWeight,
    /// Raw font bytes.
    pub bytes: Arc<Vec<u8>>,
    pub(crate) data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Fonts loaded ahead of rendering. Lookup never touches the filesystem.
#[derive(Clone, Debug, Default)]
pub struct FontRegistry {
    faces: Vec<FontFace>,
}

impl FontRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes; the family name is read from the font itself.
    pub fn register(
        &mut self,
        bytes: Vec<u8>,
        weight: Option<FontWeight>,
    ) -> FuzzResult<&FontFace> {
        let family = detect_family(&bytes)?;
        let bytes = Arc::new(bytes);
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        tracing::debug!(%family, bytes = bytes.len(), "registered font face");
        self.faces.push(FontFace {
            family,
            weight: weight.unwrap_or(FontWeight::NORMAL),
            bytes,
            data,
        });
        Ok(&self.faces[self.faces.len() - 1])
    }

    /// Read and register a font file.
    pub fn register_file(
        &mut self,
        path: &Path,
        weight: Option<FontWeight>,
    ) -> FuzzResult<&FontFace> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.register(bytes, weight)
    }

    /// Registered faces in registration order.
    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    /// Whether no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Pick the face for a CSS family stack and weight.
    ///
    /// Each stack entry is matched case-insensitively against registered family names, taking the
    /// nearest weight within the family. Generic families and an exhausted stack fall back to the
    /// nearest weight across every registered face.
    pub fn resolve(&self, family_stack: &str, weight: FontWeight) -> Option<&FontFace> {
        let candidates: Vec<(&str, f32)> = self
            .faces
            .iter()
            .map(|f| (f.family.as_str(), f.weight.0))
            .collect();
        pick_face(&candidates, family_stack, weight.0).map(|i| &self.faces[i])
    }
}

fn detect_family(bytes: &[u8]) -> FuzzResult<String> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| FuzzError::font("no font families registered from font bytes"))?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_owned)
        .ok_or_else(|| FuzzError::font("registered font family has no name"))
}

fn nearest_weight<'a>(
    candidates: impl Iterator<Item = (usize, &'a (&'a str, f32))>,
    weight: f32,
) -> Option<usize> {
    candidates
        .min_by(|(_, a), (_, b)| (a.1 - weight).abs().total_cmp(&(b.1 - weight).abs()))
        .map(|(i, _)| i)
}

pub(crate) fn pick_face(candidates: &[(&str, f32)], family_stack: &str, weight: f32) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    for entry in family_stack.split(',') {
        let name = entry.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if name.is_empty() {
            continue;
        }
        if GENERIC_FAMILIES.iter().any(|g| g.eq_ignore_ascii_case(name)) {
            break;
        }
        let hit = nearest_weight(
            candidates
                .iter()
                .enumerate()
                .filter(|(_, (fam, _))| fam.eq_ignore_ascii_case(name)),
            weight,
        );
        if hit.is_some() {
            return hit;
        }
    }
    tracing::debug!(family_stack, "no registered family matched; using fallback face");
    nearest_weight(candidates.iter().enumerate(), weight)
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
