use crate::foundation::core::Rgba8;
use crate::foundation::error::{FuzzError, FuzzResult};

/// Parse a CSS color string into straight-alpha RGBA8.
///
/// Accepted forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` (comma or space
/// separated, optional `/ alpha`), `hsl()`/`hsla()`, and a small set of named colors.
pub fn parse_css_color(input: &str) -> FuzzResult<Rgba8> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).map_err(FuzzError::validation);
    }

    let lower = s.to_ascii_lowercase();
    if let Some((name, args)) = split_function(&lower) {
        let args = split_args(args);
        return match name {
            "rgb" | "rgba" => parse_rgb_args(&args),
            "hsl" | "hsla" => parse_hsl_args(&args),
            _ => Err(FuzzError::validation(format!(
                "unsupported color function \"{name}()\""
            ))),
        };
    }

    named(&lower).ok_or_else(|| FuzzError::validation(format!("unknown color \"{s}\"")))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|v| v as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    fn hex_byte(pair: &[u8]) -> Result<u8, String> {
        Ok(nibble(pair[0])? * 16 + nibble(pair[1])?)
    }

    let b = s.as_bytes();
    match b.len() {
        3 | 4 => {
            let short = |i: usize| -> Result<u8, String> { Ok(nibble(b[i])? * 17) };
            let a = if b.len() == 4 { short(3)? } else { 255 };
            Ok(Rgba8::new(short(0)?, short(1)?, short(2)?, a))
        }
        6 | 8 => {
            let a = if b.len() == 8 { hex_byte(&b[6..8])? } else { 255 };
            Ok(Rgba8::new(
                hex_byte(&b[0..2])?,
                hex_byte(&b[2..4])?,
                hex_byte(&b[4..6])?,
                a,
            ))
        }
        _ => Err("hex color must be #rgb, #rgba, #rrggbb or #rrggbbaa".to_owned()),
    }
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

fn split_args(inner: &str) -> Vec<String> {
    // "255 0 0 / 50%" and "255, 0, 0, 0.5" normalize to the same list.
    inner
        .replace('/', " ")
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_component(tok: &str, scale: f64) -> FuzzResult<f64> {
    let (num, pct) = match tok.strip_suffix('%') {
        Some(n) => (n, true),
        None => (tok, false),
    };
    let v: f64 = num
        .parse()
        .map_err(|_| FuzzError::validation(format!("invalid color component \"{tok}\"")))?;
    if !v.is_finite() {
        return Err(FuzzError::validation("color component must be finite"));
    }
    Ok(if pct { v / 100.0 * scale } else { v })
}

fn parse_alpha(args: &[String], idx: usize) -> FuzzResult<f64> {
    match args.get(idx) {
        Some(tok) => Ok(parse_component(tok, 1.0)?.clamp(0.0, 1.0)),
        None => Ok(1.0),
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_rgb_args(args: &[String]) -> FuzzResult<Rgba8> {
    if args.len() != 3 && args.len() != 4 {
        return Err(FuzzError::validation("rgb() expects 3 or 4 components"));
    }
    let channel = |i: usize| -> FuzzResult<u8> {
        Ok(parse_component(&args[i], 255.0)?.round().clamp(0.0, 255.0) as u8)
    };
    Ok(Rgba8::new(
        channel(0)?,
        channel(1)?,
        channel(2)?,
        unit_to_u8(parse_alpha(args, 3)?),
    ))
}

fn parse_hsl_args(args: &[String]) -> FuzzResult<Rgba8> {
    if args.len() != 3 && args.len() != 4 {
        return Err(FuzzError::validation("hsl() expects 3 or 4 components"));
    }
    let h = parse_component(args[0].trim_end_matches("deg"), 360.0)?;
    let s = parse_component(&args[1], 1.0)?;
    let l = parse_component(&args[2], 1.0)?;
    let a = parse_alpha(args, 3)?;
    let [r, g, b] = hsl_to_rgb(h, s, l);
    Ok(Rgba8::new(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        unit_to_u8(a),
    ))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn named(name: &str) -> Option<Rgba8> {
    let c = match name {
        "transparent" => Rgba8::new(0, 0, 0, 0),
        "white" => Rgba8::WHITE,
        "black" => Rgba8::new(0, 0, 0, 255),
        "red" => Rgba8::new(255, 0, 0, 255),
        "green" => Rgba8::new(0, 128, 0, 255),
        "lime" => Rgba8::new(0, 255, 0, 255),
        "blue" => Rgba8::new(0, 0, 255, 255),
        "yellow" => Rgba8::new(255, 255, 0, 255),
        "cyan" | "aqua" => Rgba8::new(0, 255, 255, 255),
        "magenta" | "fuchsia" => Rgba8::new(255, 0, 255, 255),
        "orange" => Rgba8::new(255, 165, 0, 255),
        "gray" | "grey" => Rgba8::new(128, 128, 128, 255),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
