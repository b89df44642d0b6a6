use super::*;
use crate::text::backend::TextMetrics;

#[test]
fn intensity_follows_hover_and_profile() {
    let cfg = RenderConfig::new("a");
    let normal = MotionProfile::NORMAL;
    let reduced = MotionProfile::REDUCED;
    assert_eq!(active_intensity(&cfg, false, &normal), 0.18);
    assert_eq!(active_intensity(&cfg, true, &normal), 0.5);
    assert_eq!(active_intensity(&cfg, false, &reduced), 0.09);
    // Hover intensity is never scaled down.
    assert_eq!(active_intensity(&cfg, true, &reduced), 0.5);

    let no_hover = cfg.with_hover(false);
    assert_eq!(active_intensity(&no_hover, true, &normal), 0.18);
}

#[test]
fn offsets_stay_within_half_range() {
    for &(intensity, range) in &[(0.18f32, 30u32), (0.5, 30), (1.0, 15), (3.0, 30)] {
        let bound = 0.5 * intensity * range as f32;
        for i in 0..1000 {
            let u = i as f32 / 1000.0;
            let dx = line_offset(intensity, range, u);
            assert!((dx as f32).abs() <= bound, "dx={dx} bound={bound} u={u}");
        }
    }
}

#[test]
fn offsets_span_both_directions() {
    assert_eq!(line_offset(1.0, 30, 0.0), -15);
    assert_eq!(line_offset(1.0, 30, 0.5), 0);
    assert_eq!(line_offset(1.0, 30, 0.999), 14);
    assert_eq!(line_offset(0.0, 30, 0.0), 0);
}

#[test]
fn clear_rect_covers_largest_jitter() {
    let layout = LayoutMetrics::compute(
        TextMetrics {
            left: 0.0,
            right: 100.0,
            ascent: 20.0,
            descent: 4.0,
            width: 100.0,
        },
        24.0,
    )
    .unwrap();
    let cfg = RenderConfig::new("a");
    let r = clear_rect(&layout, &cfg, &MotionProfile::NORMAL);
    assert_eq!(r, IRect::new(-30, -30, 170, 84));

    // Intensities above 2 need more than `fuzz_range`.
    let wild = cfg.with_intensities(0.2, 4.0);
    assert_eq!(clear_margin(&wild, &MotionProfile::REDUCED), 30);
}

#[test]
fn clear_reach_is_capped_at_surface_size() {
    let layout = LayoutMetrics::compute(
        TextMetrics {
            left: 0.0,
            right: 100.0,
            ascent: 20.0,
            descent: 4.0,
            width: 100.0,
        },
        24.0,
    )
    .unwrap();
    let huge = RenderConfig::new("a").with_intensities(0.18, 1.0e8);
    assert!(clear_margin(&huge, &MotionProfile::NORMAL) > 1_000_000_000);
    let r = clear_rect(&layout, &huge, &MotionProfile::NORMAL);
    // Surface is 210 wide, so the reach stops at 210.
    assert_eq!(r, IRect::new(-210, -210, 110 + 420, 24 + 420));
}
