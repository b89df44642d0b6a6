use super::*;
use crate::env::viewport::ViewportInfo;
use crate::env::virtual_host::VirtualHost;
use crate::foundation::core::{PixelSize, Rgba8};
use crate::style::font::FontSizeSpec;
use crate::test_support::BlockBackend;

fn desktop() -> HostEnv {
    HostEnv::new(ViewportInfo::new(1280.0, 800.0))
}

fn handheld() -> HostEnv {
    HostEnv::new(ViewportInfo::new(390.0, 844.0))
}

fn config() -> RenderConfig {
    RenderConfig::new("HELLO").with_font_size(FontSizeSpec::Px(32.0))
}

fn mounted(env: HostEnv) -> (FuzzyText, VirtualHost, BlockBackend, MountToken) {
    let mut fuzz = FuzzyText::with_seed(config(), env, 7);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    let token = fuzz.mount(&mut host, &mut text);
    (fuzz, host, text, token)
}

#[test]
fn mount_initializes_when_fonts_are_ready() {
    let (fuzz, host, text, _) = mounted(desktop());
    assert_eq!(fuzz.state(), MountState::Running);
    assert_eq!(host.listener_count(), 4);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(text.rasterized, 1);

    let layout = fuzz.layout().unwrap();
    assert_eq!(layout.bounding_width, 80);
    assert_eq!(layout.tight_height, 24);
    assert_eq!(fuzz.surface().unwrap().size(), PixelSize::new(190, 24));
    assert_eq!(fuzz.surface().unwrap().origin(), (50, 0));
}

#[test]
fn waits_for_fonts_and_ignores_stale_notifications() {
    let mut fuzz = FuzzyText::with_seed(config(), desktop(), 1);
    let mut host = VirtualHost::new();
    host.set_fonts_ready(false);
    let mut text = BlockBackend::default();

    let first = fuzz.mount(&mut host, &mut text);
    assert_eq!(fuzz.state(), MountState::AwaitingFonts);
    assert_eq!(host.frames_requested(), 0);

    let second = fuzz.mount(&mut host, &mut text);
    host.set_fonts_ready(true);
    fuzz.on_fonts_ready(first, &mut host, &mut text);
    assert_eq!(fuzz.state(), MountState::AwaitingFonts);

    fuzz.on_fonts_ready(second, &mut host, &mut text);
    assert_eq!(fuzz.state(), MountState::Running);
    // A duplicate notification does not initialize twice.
    fuzz.on_fonts_ready(second, &mut host, &mut text);
    assert_eq!(text.rasterized, 1);
}

#[test]
fn teardown_before_fonts_resolve_cancels_initialization() {
    let mut fuzz = FuzzyText::with_seed(config(), desktop(), 1);
    let mut host = VirtualHost::new();
    host.set_fonts_ready(false);
    let mut text = BlockBackend::default();

    let token = fuzz.mount(&mut host, &mut text);
    fuzz.teardown(token, &mut host);
    host.set_fonts_ready(true);
    fuzz.on_fonts_ready(token, &mut host, &mut text);
    assert_eq!(fuzz.state(), MountState::Detached);
    assert_eq!(host.frames_requested(), 0);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn teardown_is_idempotent() {
    let (mut fuzz, mut host, _, token) = mounted(desktop());
    fuzz.teardown(token, &mut host);
    fuzz.teardown(token, &mut host);
    fuzz.teardown(MountToken(0), &mut host);
    assert_eq!(fuzz.state(), MountState::Detached);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.frames_cancelled(), 1);
}

#[test]
fn stale_token_does_not_tear_down_newer_mount() {
    let (mut fuzz, mut host, mut text, old) = mounted(desktop());
    let new = fuzz.mount(&mut host, &mut text);
    assert_ne!(old, new);
    fuzz.teardown(old, &mut host);
    assert_eq!(fuzz.state(), MountState::Running);
    assert_eq!(host.listener_count(), 4);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn hover_disabled_attaches_no_listeners() {
    let mut fuzz = FuzzyText::with_seed(config().with_hover(false), desktop(), 3);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);
    assert_eq!(host.listener_count(), 0);

    fuzz.on_pointer(
        &PointerEvent::Move {
            client: Point::new(100.0, 10.0),
        },
        &host,
    );
    assert!(!fuzz.is_hovering());
}

#[test]
fn environment_failures_leave_component_inert() {
    let mut fuzz = FuzzyText::with_seed(config(), desktop(), 3);
    let mut host = VirtualHost::new();
    host.set_context_available(false);
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);
    assert_eq!(fuzz.state(), MountState::Inert);
    assert_eq!(host.frames_requested(), 0);
    assert_eq!(host.listener_count(), 0);

    let mut host = VirtualHost::new();
    let mut failing = BlockBackend {
        fail_measure: true,
        ..BlockBackend::default()
    };
    fuzz.mount(&mut host, &mut failing);
    assert_eq!(fuzz.state(), MountState::Inert);
    assert_eq!(host.frames_requested(), 0);

    let mut bad = FuzzyText::with_seed(config().with_color("not-a-color"), desktop(), 3);
    bad.mount(&mut host, &mut text);
    assert_eq!(bad.state(), MountState::Inert);
}

#[test]
fn frames_draw_one_strip_per_row_and_reschedule() {
    let (mut fuzz, mut host, _, _) = mounted(desktop());
    let due = host.take_due_frames();
    assert_eq!(fuzz.on_frame(due[0], 0.0, &mut host), FrameOutcome::Drawn);
    assert_eq!(fuzz.last_offsets().len(), 24);
    assert_eq!(host.pending_frames(), 1);

    // Only the pending handle is honored.
    assert_eq!(
        fuzz.on_frame(due[0], 16.0, &mut host),
        FrameOutcome::Ignored
    );
    let bound = 0.5 * 0.18 * 30.0;
    assert!(
        fuzz.last_offsets()
            .iter()
            .all(|dx| (*dx as f64).abs() <= bound)
    );
}

#[test]
fn reduced_profile_throttles_and_skips_rows() {
    let (mut fuzz, mut host, _, _) = mounted(handheld());
    let mut outcomes = Vec::new();
    for i in 0..4 {
        let h = host.take_due_frames()[0];
        outcomes.push(fuzz.on_frame(h, f64::from(i) * 16.0, &mut host));
    }
    assert_eq!(
        outcomes,
        vec![
            FrameOutcome::Drawn,
            FrameOutcome::Throttled,
            FrameOutcome::Throttled,
            FrameOutcome::Throttled,
        ]
    );
    assert_eq!(fuzz.last_offsets().len(), 12);
    let h = host.take_due_frames()[0];
    assert_eq!(fuzz.on_frame(h, 67.0, &mut host), FrameOutcome::Drawn);
    assert_eq!(fuzz.animation_state().unwrap().draws, 2);
}

#[test]
fn zero_intensity_copies_offscreen_at_margin() {
    let mut fuzz = FuzzyText::with_seed(config().with_intensities(0.0, 0.0), desktop(), 9);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);
    let h = host.take_due_frames()[0];
    fuzz.on_frame(h, 0.0, &mut host);

    let surface = fuzz.surface().unwrap();
    let offscreen = fuzz.offscreen().unwrap();
    for x in 0..offscreen.width() as i64 {
        assert_eq!(surface.alpha_at(x + 50, 3), offscreen.alpha_at(x, 3), "x={x}");
    }
    assert_eq!(surface.alpha_at(54, 0), 0);
    assert_eq!(surface.alpha_at(55, 0), 255);
    assert_eq!(surface.alpha_at(134, 0), 255);
    assert_eq!(surface.alpha_at(135, 0), 0);
}

#[test]
fn pointer_hit_testing_uses_surface_origin() {
    let mut fuzz = FuzzyText::with_seed(config(), desktop(), 5);
    let mut host = VirtualHost::new().with_origin(Point::new(100.0, 200.0));
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);

    // Hit rect is [55, 0]..[135, 24] in surface coordinates.
    let at = |x: f64, y: f64| PointerEvent::Move {
        client: Point::new(100.0 + x, 200.0 + y),
    };
    fuzz.on_pointer(&at(55.0, 0.0), &host);
    assert!(fuzz.is_hovering());
    fuzz.on_pointer(&at(54.0, 10.0), &host);
    assert!(!fuzz.is_hovering());
    fuzz.on_pointer(&at(135.0, 24.0), &host);
    assert!(fuzz.is_hovering());
    fuzz.on_pointer(&PointerEvent::Leave, &host);
    assert!(!fuzz.is_hovering());

    fuzz.on_pointer(
        &PointerEvent::TouchMove {
            touches: vec![Point::new(190.0, 210.0), Point::new(0.0, 0.0)],
        },
        &host,
    );
    assert!(fuzz.is_hovering());
    fuzz.on_pointer(&PointerEvent::TouchMove { touches: vec![] }, &host);
    assert!(fuzz.is_hovering());
    fuzz.on_pointer(&PointerEvent::TouchEnd, &host);
    assert!(!fuzz.is_hovering());
}

#[test]
fn hovering_raises_jitter_bound() {
    let mut fuzz = FuzzyText::with_seed(config().with_intensities(0.0, 0.5), desktop(), 11);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);
    fuzz.on_pointer(
        &PointerEvent::Move {
            client: Point::new(90.0, 10.0),
        },
        &host,
    );

    let mut saw_nonzero = false;
    for i in 0..20 {
        let h = host.take_due_frames()[0];
        fuzz.on_frame(h, f64::from(i) * 16.0, &mut host);
        for dx in fuzz.last_offsets() {
            assert!((*dx as f64).abs() <= 7.5);
            saw_nonzero |= *dx != 0;
        }
    }
    assert!(saw_nonzero);
}

#[test]
fn extreme_hover_intensity_still_draws() {
    let cfg = config().with_intensities(0.18, 1.0e8);
    assert!(cfg.validate().is_ok());
    let mut fuzz = FuzzyText::with_seed(cfg, desktop(), 13);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    fuzz.mount(&mut host, &mut text);
    fuzz.on_pointer(
        &PointerEvent::Move {
            client: Point::new(90.0, 10.0),
        },
        &host,
    );

    for i in 0..3 {
        let h = host.take_due_frames()[0];
        assert_eq!(
            fuzz.on_frame(h, f64::from(i) * 16.0, &mut host),
            FrameOutcome::Drawn
        );
    }
    // Every strip lands off the surface, and the clear wiped the rest.
    let surface = fuzz.surface().unwrap();
    assert!((0..190).all(|x| surface.alpha_at(x, 5) == 0));
}

#[test]
fn update_remounts_only_on_change() {
    let (mut fuzz, mut host, mut text, token) = mounted(desktop());
    let before = fuzz.offscreen().unwrap().clone();

    assert_eq!(fuzz.update(config(), &mut host, &mut text), token);
    assert!(fuzz.offscreen().unwrap().ptr_eq(&before));

    let next = fuzz.update(config().with_color("#f00"), &mut host, &mut text);
    assert_ne!(next, token);
    assert!(!fuzz.offscreen().unwrap().ptr_eq(&before));
    assert_eq!(host.frames_cancelled(), 1);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.listener_count(), 4);
    assert_eq!(fuzz.style().unwrap().color, Rgba8::new(255, 0, 0, 255));
}

#[test]
fn set_env_remounts_when_profile_or_size_changes() {
    let mut fuzz = FuzzyText::with_seed(RenderConfig::new("HELLO"), desktop(), 2);
    let mut host = VirtualHost::new();
    let mut text = BlockBackend::default();
    let token = fuzz.mount(&mut host, &mut text);
    // clamp(2rem, 8vw, 8rem) is 102.4px at 1280 and 128px at 1600.
    assert_eq!(fuzz.layout().unwrap().font_size_px, 102.4);

    let same = HostEnv::new(ViewportInfo::new(1280.0, 600.0));
    assert_eq!(fuzz.set_env(same, &mut host, &mut text), token);

    let wider = HostEnv::new(ViewportInfo::new(1600.0, 900.0));
    let t2 = fuzz.set_env(wider, &mut host, &mut text);
    assert_ne!(t2, token);
    assert_eq!(fuzz.layout().unwrap().font_size_px, 128.0);

    let t3 = fuzz.set_env(handheld(), &mut host, &mut text);
    assert_ne!(t3, t2);
    assert_eq!(fuzz.profile(), MotionProfile::REDUCED);
}
