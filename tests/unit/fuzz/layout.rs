use super::*;
use crate::foundation::core::Point;

fn metrics(left: f64, right: f64, ascent: f64, descent: f64) -> TextMetrics {
    TextMetrics {
        left,
        right,
        ascent,
        descent,
        width: left + right,
    }
}

#[test]
fn derives_surface_and_hit_rect() {
    let l = LayoutMetrics::compute(metrics(0.4, 109.3, 23.2, 0.4), 32.0).unwrap();
    assert_eq!(l.bounding_width, 110);
    assert_eq!(l.tight_height, 24);
    assert_eq!(l.offscreen, PixelSize::new(120, 24));
    assert_eq!(l.x_offset, 5);
    assert_eq!(l.surface, PixelSize::new(220, 24));
    assert_eq!(
        l.hit_rect,
        HitRect {
            left: 55.0,
            top: 0.0,
            right: 165.0,
            bottom: 24.0
        }
    );
}

#[test]
fn hit_rect_edges_are_inclusive() {
    let l = LayoutMetrics::compute(metrics(0.0, 100.0, 20.0, 0.0), 20.0).unwrap();
    let r = l.hit_rect;
    assert!(r.contains(Point::new(55.0, 0.0)));
    assert!(r.contains(Point::new(155.0, 20.0)));
    assert!(r.contains(r.center()));
    assert!(!r.contains(Point::new(54.9, 10.0)));
    assert!(!r.contains(Point::new(155.1, 10.0)));
    assert!(!r.contains(Point::new(100.0, 20.5)));
}

#[test]
fn degenerate_metrics_produce_no_layout() {
    assert!(LayoutMetrics::compute(metrics(0.0, 10.0, 0.0, 0.0), 16.0).is_none());
    assert!(LayoutMetrics::compute(metrics(0.0, f64::NAN, 10.0, 2.0), 16.0).is_none());
}

#[test]
fn fallback_metrics_still_lay_out() {
    let l = LayoutMetrics::compute(TextMetrics::fallback(0.0, 32.0), 32.0).unwrap();
    assert_eq!(l.bounding_width, 0);
    assert_eq!(l.tight_height, 39);
    assert_eq!(l.offscreen.width, EXTRA_WIDTH_BUFFER);
}
