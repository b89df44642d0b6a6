use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::foundation::error::{FuzzError, FuzzResult};

/// One converted image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConvertedImage {
    /// Source PNG.
    pub input: PathBuf,
    /// Written WebP sibling.
    pub output: PathBuf,
    /// Source size in bytes.
    pub input_bytes: u64,
    /// Output size in bytes.
    pub output_bytes: u64,
}

impl ConvertedImage {
    /// Size reduction in percent; negative when the WebP is larger.
    pub fn savings_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.output_bytes as f64 / self.input_bytes as f64) * 100.0
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Write `input` as a lossless WebP at `output`.
pub fn convert_png(input: &Path, output: &Path) -> FuzzResult<ConvertedImage> {
    let img = image::open(input)
        .map_err(|e| FuzzError::encode(format!("decode '{}': {e}", input.display())))?
        .to_rgba8();

    let f = File::create(output).with_context(|| format!("create '{}'", output.display()))?;
    image::codecs::webp::WebPEncoder::new_lossless(BufWriter::new(f))
        .encode(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| FuzzError::encode(format!("encode '{}': {e}", output.display())))?;

    let input_bytes = std::fs::metadata(input)
        .with_context(|| format!("stat '{}'", input.display()))?
        .len();
    let output_bytes = std::fs::metadata(output)
        .with_context(|| format!("stat '{}'", output.display()))?
        .len();
    Ok(ConvertedImage {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_bytes,
        output_bytes,
    })
}

/// Convert every `.png` under `dir` (recursively) to a sibling `.webp`.
///
/// Entries are visited in name order. Existing WebP files are overwritten.
#[tracing::instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn convert_png_tree(dir: &Path) -> FuzzResult<Vec<ConvertedImage>> {
    let mut out = Vec::new();
    visit(dir, &mut out)?;
    tracing::info!(converted = out.len(), "conversion finished");
    Ok(out)
}

fn visit(dir: &Path, out: &mut Vec<ConvertedImage>) -> FuzzResult<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("read dir '{}'", dir.display()))?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("list dir '{}'", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            visit(&path, out)?;
        } else if is_png(&path) {
            let converted = convert_png(&path, &path.with_extension("webp"))?;
            tracing::info!(
                input = %converted.input.display(),
                output = %converted.output.display(),
                savings_pct = converted.savings_percent(),
                "converted"
            );
            out.push(converted);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/webp.rs"]
mod tests;
