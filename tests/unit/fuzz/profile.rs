use super::*;

#[test]
fn selects_profile_from_viewport() {
    assert_eq!(
        MotionProfile::for_viewport(&ViewportInfo::new(1280.0, 800.0)),
        MotionProfile::NORMAL
    );
    assert_eq!(
        MotionProfile::for_viewport(&ViewportInfo::new(767.0, 800.0)),
        MotionProfile::REDUCED
    );
    assert_eq!(
        MotionProfile::for_viewport(&ViewportInfo::new(768.0, 800.0)),
        MotionProfile::NORMAL
    );
    let phone = ViewportInfo::from_user_agent(1024.0, 1366.0, "Mozilla/5.0 (iPad; CPU OS 17_0)");
    assert_eq!(MotionProfile::for_viewport(&phone), MotionProfile::REDUCED);
}

#[test]
fn reduced_profile_constants() {
    let p = MotionProfile::REDUCED;
    assert_eq!(p.frame_interval_ms, 67.0);
    assert_eq!(p.fuzz_range, 15);
    assert_eq!(p.line_step, 2);
    assert_eq!(p.idle_scale, 0.5);
}

#[test]
fn throttle_gates_draws() {
    let p = MotionProfile::REDUCED;
    assert!(p.should_draw(None, 3.0));
    assert!(!p.should_draw(Some(0.0), 50.0));
    assert!(!p.should_draw(Some(0.0), 66.9));
    assert!(p.should_draw(Some(0.0), 67.0));
    assert!(MotionProfile::NORMAL.should_draw(Some(10.0), 10.0));
}
