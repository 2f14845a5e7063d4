use std::collections::BTreeSet;

use super::*;
use crate::surface::opts::SurfaceOpts;

fn painted(s: &Surface) -> BTreeSet<(i32, i32)> {
    let mut out = BTreeSet::new();
    for y in 0..s.height() {
        for x in 0..s.width() {
            if s.get_pixel(x, y).unwrap() != Color::TRANSPARENT {
                out.insert((x, y));
            }
        }
    }
    out
}

#[test]
fn midpoint_starts_inside_radius_and_ends_on_diagonal() {
    let steps: Vec<_> = Midpoint::new(5).collect();
    assert_eq!(steps.first(), Some(&(4, 0)));
    assert!(steps.iter().all(|&(x, y)| x >= y));
    assert_eq!(Midpoint::new(1).collect::<Vec<_>>(), vec![(0, 0)]);
}

#[test]
fn circle_is_symmetric_about_both_axes() {
    let c = Point::new(12, 10);
    for r in [1, 2, 5, 9] {
        let mut s = Surface::new(25, 21).unwrap();
        s.draw_circle(c, r, Color::WHITE).unwrap();
        let px = painted(&s);
        assert!(!px.is_empty());
        for &(x, y) in &px {
            assert!(px.contains(&(2 * c.x - x, y)), "r={r} ({x},{y})");
            assert!(px.contains(&(x, 2 * c.y - y)), "r={r} ({x},{y})");
        }
    }
}

#[test]
fn filled_circle_contains_outline_and_is_solid_per_row() {
    let c = Point::new(10, 10);
    let mut outline = Surface::new(21, 21).unwrap();
    let mut filled = Surface::new(21, 21).unwrap();
    outline.draw_circle(c, 8, Color::RED).unwrap();
    filled.fill_circle(c, 8, Color::RED).unwrap();

    let ring = painted(&outline);
    let disk = painted(&filled);
    assert!(ring.is_subset(&disk));
    for y in 0..21 {
        let xs: Vec<_> = disk.iter().filter(|p| p.1 == y).map(|p| p.0).collect();
        if let (Some(lo), Some(hi)) = (xs.first(), xs.last()) {
            assert_eq!(xs.len() as i32, hi - lo + 1, "row {y} has a gap");
        }
    }
}

#[test]
fn radius_must_be_positive_and_circle_in_bounds() {
    let mut s = Surface::new(10, 10).unwrap();
    assert!(matches!(
        s.draw_circle(Point::new(5, 5), 0, Color::RED),
        Err(PixtileError::Misuse(_))
    ));
    assert!(matches!(
        s.fill_circle(Point::new(2, 5), 4, Color::RED),
        Err(PixtileError::OutOfBounds(_))
    ));
    s.fill_circle(Point::new(3, 5), 4, Color::RED).unwrap();
}

#[test]
fn quadrants_partition_the_outline() {
    let c = Point::new(10, 10);
    let mut full = Surface::new(21, 21).unwrap();
    full.draw_circle(c, 7, Color::BLUE).unwrap();

    let mut union = BTreeSet::new();
    for q in [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ] {
        let mut s = Surface::new(21, 21).unwrap();
        s.draw_quadrant(c, 7, q, Color::BLUE).unwrap();
        let px = painted(&s);
        let (sx, sy) = q.signs();
        assert!(
            px.iter()
                .all(|&(x, y)| (x - c.x) * sx >= 0 && (y - c.y) * sy >= 0),
            "{q:?} leaked outside its quarter"
        );
        union.extend(px);
    }
    assert_eq!(union, painted(&full));
}

#[test]
fn top_right_quadrant_may_touch_the_edge() {
    let mut s = Surface::new(6, 6).unwrap();
    s.fill_quadrant(Point::new(0, 5), 6, Quadrant::TopRight, Color::GREEN)
        .unwrap();
    assert_eq!(s.get_pixel(0, 5).unwrap(), Color::GREEN);
    assert_eq!(s.get_pixel(5, 5).unwrap(), Color::GREEN);
    assert!(matches!(
        s.fill_quadrant(Point::new(0, 5), 6, Quadrant::TopLeft, Color::GREEN),
        Err(PixtileError::OutOfBounds(_))
    ));
}

#[test]
fn gradient_circle_runs_from_inner_to_outer() {
    let c = Point::new(10, 10);
    let mut s = Surface::new(21, 21).unwrap();
    s.fill_gradient_circle(c, 10, Color::WHITE, Color::BLACK)
        .unwrap();
    assert_eq!(s.get_pixel(10, 10).unwrap(), Color::WHITE);
    let edge = s.get_pixel(19, 10).unwrap();
    assert!(edge.r < 40, "rim should be near outer, got {edge:?}");
    let mid = s.get_pixel(15, 10).unwrap();
    assert_eq!(mid.r, 128);
}

#[test]
fn tiled_circles_match_flat() {
    let mut flat = Surface::new(31, 29).unwrap();
    let mut tiled =
        Surface::with_opts(31, 29, &SurfaceOpts::default().with_tile_size(8, 6)).unwrap();
    for s in [&mut flat, &mut tiled] {
        s.fill_circle(Point::new(15, 14), 12, Color::RED).unwrap();
        s.draw_circle(Point::new(15, 14), 9, Color::GREEN).unwrap();
        s.fill_gradient_quadrant(
            Point::new(15, 14),
            7,
            Quadrant::BottomLeft,
            Color::WHITE,
            Color::BLUE,
        )
        .unwrap();
    }
    assert_eq!(flat.to_rgba8().unwrap(), tiled.to_rgba8().unwrap());
}

#[test]
fn oversized_radius_and_extreme_centers_are_out_of_bounds() {
    let mut s = Surface::new(16, 16).unwrap();
    let c = Point::new(8, 8);
    let calls: [(&str, PixtileResult<()>); 4] = [
        ("circle", s.draw_circle(c, i32::MAX, Color::RED)),
        ("fill", s.fill_circle(c, i32::MAX / 2 + 1, Color::RED)),
        (
            "quadrant",
            s.fill_quadrant(Point::new(i32::MIN, 0), 3, Quadrant::TopLeft, Color::RED),
        ),
        (
            "gradient",
            s.fill_gradient_circle(Point::new(0, i32::MIN), 2, Color::RED, Color::BLUE),
        ),
    ];
    for (name, result) in calls {
        assert!(
            matches!(result, Err(PixtileError::OutOfBounds(_))),
            "{name}: {result:?}"
        );
    }
    assert!(painted(&s).is_empty());
}
