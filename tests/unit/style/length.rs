use super::*;

fn ctx(viewport_width: f64) -> LengthContext {
    LengthContext {
        viewport_width,
        viewport_height: 800.0,
        root_font_px: 16.0,
        parent_font_px: 16.0,
    }
}

fn px(src: &str, vw: f64) -> f64 {
    parse_length(src).unwrap().resolve_px(&ctx(vw)).unwrap()
}

#[test]
fn plain_units_resolve() {
    assert_eq!(px("32px", 1000.0), 32.0);
    assert_eq!(px("2rem", 1000.0), 32.0);
    assert_eq!(px("1.5em", 1000.0), 24.0);
    assert_eq!(px("150%", 1000.0), 24.0);
    assert_eq!(px("8vw", 1000.0), 80.0);
    assert_eq!(px("12pt", 1000.0), 16.0);
    assert_eq!(px("10vmin", 1000.0), 80.0);
}

#[test]
fn hero_clamp_tracks_viewport_between_bounds() {
    let src = "clamp(2rem, 8vw, 8rem)";
    // 8vw of 300px is 24px, below the 32px floor.
    assert_eq!(px(src, 300.0), 32.0);
    assert_eq!(px(src, 1000.0), 80.0);
    // 8vw of 2000px is 160px, above the 128px ceiling.
    assert_eq!(px(src, 2000.0), 128.0);
}

#[test]
fn clamp_minimum_wins_when_bounds_cross() {
    assert_eq!(px("clamp(50px, 10px, 20px)", 1000.0), 50.0);
}

#[test]
fn calc_min_max_and_precedence() {
    assert_eq!(px("calc(1rem + 2 * 4px)", 1000.0), 24.0);
    assert_eq!(px("calc((1rem + 4px) / 2)", 1000.0), 10.0);
    assert_eq!(px("min(10vw, 50px, 3rem)", 1000.0), 48.0);
    assert_eq!(px("max(1px, -2px)", 1000.0), 1.0);
    assert_eq!(px("-2px + 4px", 1000.0), 2.0);
}

#[test]
fn em_unit_is_not_an_exponent() {
    assert_eq!(px("2em", 1000.0), 32.0);
    assert_eq!(px("1e1px", 1000.0), 10.0);
}

#[test]
fn unit_errors_are_reported() {
    let c = ctx(1000.0);
    assert!(parse_length("2furlongs").is_err());
    assert!(parse_length("clamp(1px, 2px)").is_err());
    assert!(parse_length("foo(1px)").is_err());
    assert!(parse_length("1px +").is_err());
    assert!(parse_length("1px * 2px").unwrap().resolve_px(&c).is_err());
    assert!(parse_length("1px + 2").unwrap().resolve_px(&c).is_err());
    assert!(parse_length("1px / 0").unwrap().resolve_px(&c).is_err());
    assert!(parse_length("32").unwrap().resolve_px(&c).is_err());
    assert_eq!(parse_length("0").unwrap().resolve_px(&c).unwrap(), 0.0);
}

#[test]
fn source_is_trimmed() {
    assert_eq!(parse_length("  8vw ").unwrap().source(), "8vw");
}
