use super::*;

#[test]
fn rect_contains_boundaries() {
    let r = Rect::new(2, 3, 4, 5);
    assert!(r.contains_point(2, 3));
    assert!(r.contains_point(5, 7));
    assert!(!r.contains_point(6, 7));
    assert!(!r.contains_point(5, 8));
    assert!(!r.contains_point(1, 3));
}

#[test]
fn rect_contains_rect_rejects_empty_and_overhang() {
    let bounds = Rect::new(0, 0, 10, 10);
    assert!(bounds.contains_rect(Rect::new(0, 0, 10, 10)));
    assert!(bounds.contains_rect(Rect::new(9, 9, 1, 1)));
    assert!(!bounds.contains_rect(Rect::new(9, 9, 2, 1)));
    assert!(!bounds.contains_rect(Rect::new(-1, 0, 2, 2)));
    assert!(!bounds.contains_rect(Rect::new(3, 3, 0, 2)));
}

#[test]
fn rect_overlap_is_exclusive_on_far_edges() {
    let a = Rect::new(0, 0, 128, 128);
    assert!(a.overlaps(Rect::new(127, 127, 10, 10)));
    assert!(!a.overlaps(Rect::new(128, 0, 10, 10)));
    assert!(!a.overlaps(Rect::new(0, 128, 10, 10)));
}

#[test]
fn rect_intersect_matches_manual_math() {
    let a = Rect::new(100, 100, 100, 100);
    let tile = Rect::new(128, 0, 128, 128);
    assert_eq!(a.intersect(tile), Some(Rect::new(128, 100, 72, 28)));
    assert_eq!(a.intersect(Rect::new(300, 300, 5, 5)), None);
}

#[test]
fn point_lerp_rounds_to_nearest() {
    let a = Point::new(0, 0);
    let b = Point::new(10, 3);
    assert_eq!(Point::lerp(a, b, 0.0), a);
    assert_eq!(Point::lerp(a, b, 1.0), b);
    assert_eq!(Point::lerp(a, b, 0.5), Point::new(5, 2));
}

#[test]
fn size_area_ignores_negative_extents() {
    assert_eq!(Size::new(3, 4).area(), 12);
    assert_eq!(Size::new(-3, 4).area(), 0);
    assert!(Size::new(0, 4).is_empty());
}

#[test]
fn rect_predicates_hold_at_i32_limits() {
    let bounds = Rect::new(0, 0, 16, 16);
    let wide = Rect::new(10, 0, i32::MAX, 1);
    assert_eq!(wide.right(), i32::MAX);
    assert!(!bounds.contains_rect(wide));
    assert!(!bounds.contains_rect(Rect::new(0, i32::MAX, 1, i32::MAX)));
    assert!(!bounds.contains_point(i32::MAX, 0));
    assert!(!wide.contains_point(i32::MIN, 0));

    assert!(bounds.overlaps(wide));
    assert_eq!(bounds.intersect(wide), Some(Rect::new(10, 0, 6, 1)));
    let far_left = Rect::new(i32::MIN, 2, i32::MAX, 3);
    assert!(!bounds.overlaps(far_left));
    assert_eq!(bounds.intersect(far_left), None);
}

#[test]
fn checked_translate_reports_overflow() {
    let r = Rect::new(0, 2, 4, 2);
    assert_eq!(r.checked_translate(3, -1), Some(Rect::new(3, 1, 4, 2)));
    assert_eq!(r.checked_translate(0, i32::MAX), None);
    assert_eq!(r.checked_translate(i32::MIN, 0), Some(Rect::new(i32::MIN, 2, 4, 2)));
    assert_eq!(Rect::new(-1, 0, 1, 1).checked_translate(i32::MIN, 0), None);
}
