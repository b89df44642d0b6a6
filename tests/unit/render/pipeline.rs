use super::*;
use crate::env::viewport::ViewportInfo;
use crate::fuzz::config::RenderConfig;
use crate::scene::scenario::{PointerAction, PointerCue};
use crate::style::font::FontSizeSpec;
use crate::test_support::BlockBackend;

fn scenario() -> Scenario {
    let mut s = Scenario::new(RenderConfig::new("HELLO").with_font_size(FontSizeSpec::Px(32.0)));
    s.fps = 60;
    s.duration_ms = 500;
    s.seed = 42;
    s
}

#[test]
fn renders_every_tick_at_surface_size() {
    let frames = render_frames(&scenario(), &mut BlockBackend::default()).unwrap();
    assert_eq!(frames.len(), 30);
    assert!(frames.iter().all(|f| (f.width, f.height) == (190, 24)));
    assert!(frames.iter().all(|f| f.premultiplied));
    // Ink lands somewhere every frame.
    assert!(frames.iter().all(|f| f.data.chunks_exact(4).any(|p| p[3] > 0)));
}

#[test]
fn same_seed_renders_identically() {
    let a = render_frames(&scenario(), &mut BlockBackend::default()).unwrap();
    let b = render_frames(&scenario(), &mut BlockBackend::default()).unwrap();
    assert_eq!(a, b);

    let mut other = scenario();
    other.seed = 43;
    let c = render_frames(&other, &mut BlockBackend::default()).unwrap();
    assert_ne!(a, c);
}

#[test]
fn frames_before_fonts_are_transparent() {
    let mut s = scenario();
    s.fonts_ready_at_ms = 100;
    let frames = render_frames(&s, &mut BlockBackend::default()).unwrap();
    // Ticks at 0, 16.7, ..., 83.3 precede readiness.
    for f in &frames[..6] {
        assert_eq!((f.width, f.height), (190, 24));
        assert!(f.data.iter().all(|&b| b == 0));
    }
    assert!(frames[6].data.chunks_exact(4).any(|p| p[3] > 0));
}

#[test]
fn failing_backend_is_an_error_not_a_panic() {
    let mut text = BlockBackend {
        fail_measure: true,
        ..BlockBackend::default()
    };
    let err = render_frames(&scenario(), &mut text).unwrap_err();
    assert!(err.to_string().contains("nothing was rendered"));
}

#[test]
fn handheld_scenario_draws_at_most_fifteen_times_per_second() {
    let mut s = scenario();
    s.viewport = ViewportInfo::new(390.0, 844.0);
    s.duration_ms = 1000;
    let mut text = BlockBackend::default();
    let mut playback = Playback::new(&s, &mut text).unwrap();
    for _ in 0..s.frame_count() {
        playback.step(&mut text);
    }
    let draws = playback.component().animation_state().unwrap().draws;
    // 67 ms at a 60 Hz refresh means every fifth tick.
    assert_eq!(draws, 12);
}

#[test]
fn pointer_cues_toggle_hover() {
    let mut s = scenario();
    s.surface_origin = crate::foundation::core::Point::new(10.0, 20.0);
    s.pointer = vec![
        PointerCue {
            at_ms: 50,
            action: PointerAction::Move { x: 100.0, y: 30.0 },
        },
        PointerCue {
            at_ms: 200,
            action: PointerAction::Leave,
        },
    ];
    let mut text = BlockBackend::default();
    let mut playback = Playback::new(&s, &mut text).unwrap();
    let mut hovering = Vec::new();
    for _ in 0..15 {
        playback.step(&mut text);
        hovering.push(playback.component().is_hovering());
    }
    assert!(!hovering[2]);
    assert!(hovering[3]);
    assert!(hovering[11]);
    assert!(!hovering[12]);
}

#[test]
fn pointer_cues_apply_in_time_order_whatever_the_listing() {
    let mut s = scenario();
    s.pointer = vec![
        PointerCue {
            at_ms: 400,
            action: PointerAction::Leave,
        },
        PointerCue {
            at_ms: 100,
            action: PointerAction::Move { x: 90.0, y: 10.0 },
        },
    ];
    let mut text = BlockBackend::default();
    let mut playback = Playback::new(&s, &mut text).unwrap();
    let mut hovering = Vec::new();
    for _ in 0..30 {
        playback.step(&mut text);
        hovering.push(playback.component().is_hovering());
    }
    // 100 ms is tick 6 and 400 ms is tick 24 at 60 Hz.
    assert!(!hovering[5]);
    assert!(hovering[6]);
    assert!(hovering[23]);
    assert!(!hovering[24]);
}

#[test]
fn hover_cues_are_dropped_without_listeners() {
    let mut s = scenario();
    s.config.enable_hover = false;
    s.pointer = vec![PointerCue {
        at_ms: 0,
        action: PointerAction::Move { x: 100.0, y: 10.0 },
    }];
    let mut text = BlockBackend::default();
    let mut playback = Playback::new(&s, &mut text).unwrap();
    playback.step(&mut text);
    assert!(!playback.component().is_hovering());
    assert_eq!(playback.host().listener_count(), 0);
}

#[test]
fn frame_at_time_matches_full_render() {
    let s = scenario();
    let all = render_frames(&s, &mut BlockBackend::default()).unwrap();
    let at = render_frame_at(&s, 100.0, &mut BlockBackend::default()).unwrap();
    assert_eq!(at, all[6]);
    assert!(render_frame_at(&s, 501.0, &mut BlockBackend::default()).is_err());
    assert!(render_frame_at(&s, f64::NAN, &mut BlockBackend::default()).is_err());
}

#[test]
fn inspect_reports_layout_and_profile() {
    let mut s = scenario();
    s.fonts_ready_at_ms = 400;
    s.config.class_name = "hero".into();
    let report = inspect(&s, &mut BlockBackend::default()).unwrap();
    assert_eq!(report.state, MountState::Running);
    assert_eq!(report.css_class, "fuzzy-text-canvas hero");
    assert_eq!(report.declared_font, "900 32px inherit");
    assert_eq!(report.resolved_font.as_deref(), Some("900 32px sans-serif"));
    assert!(!report.reduced_resource);
    assert_eq!(report.profile, MotionProfile::NORMAL);
    assert_eq!(report.layout.unwrap().surface.width, 190);
    assert_eq!(report.animation.as_ref().unwrap().draws, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["state"], "running");
    assert_eq!(json["layout"]["hit_rect"]["left"], 55.0);
}
