use super::*;
use crate::foundation::error::PixtileError;
use crate::surface::opts::SurfaceOpts;

fn painted(s: &Surface) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..s.height() {
        for x in 0..s.width() {
            if s.get_pixel(x, y).unwrap() != Color::TRANSPARENT {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn horizontal_and_vertical_lines_cover_every_pixel() {
    let mut s = Surface::new(8, 8).unwrap();
    s.draw_line(Point::new(1, 2), Point::new(6, 2), Color::RED)
        .unwrap();
    assert_eq!(painted(&s), (1..=6).map(|x| (x, 2)).collect::<Vec<_>>());

    let mut s = Surface::new(8, 8).unwrap();
    s.draw_line(Point::new(3, 7), Point::new(3, 0), Color::RED)
        .unwrap();
    assert_eq!(painted(&s), (0..=7).map(|y| (3, y)).collect::<Vec<_>>());
}

#[test]
fn steep_line_has_a_pixel_on_every_row_and_column() {
    let mut s = Surface::new(10, 20).unwrap();
    s.draw_line(Point::new(1, 0), Point::new(4, 19), Color::WHITE)
        .unwrap();
    let px = painted(&s);
    for y in 0..20 {
        assert!(px.iter().any(|&(_, py)| py == y), "row {y} empty");
    }
    for x in 1..=4 {
        assert!(px.iter().any(|&(pxx, _)| pxx == x), "column {x} empty");
    }
    assert!(px.contains(&(1, 0)));
    assert!(px.contains(&(4, 19)));
}

#[test]
fn single_point_line_sets_one_pixel() {
    let mut s = Surface::new(4, 4).unwrap();
    s.draw_line(Point::new(2, 2), Point::new(2, 2), Color::BLUE)
        .unwrap();
    assert_eq!(painted(&s), vec![(2, 2)]);
}

#[test]
fn out_of_bounds_endpoint_fails_without_drawing() {
    let mut s = Surface::new(4, 4).unwrap();
    assert!(matches!(
        s.draw_line(Point::new(0, 0), Point::new(4, 1), Color::RED),
        Err(PixtileError::OutOfBounds(_))
    ));
    assert!(painted(&s).is_empty());
}

#[test]
fn tiled_line_matches_flat_line() {
    let mut flat = Surface::new(23, 17).unwrap();
    let mut tiled =
        Surface::with_opts(23, 17, &SurfaceOpts::default().with_tile_size(5, 4)).unwrap();
    for s in [&mut flat, &mut tiled] {
        s.draw_line(Point::new(0, 16), Point::new(22, 3), Color::GREEN)
            .unwrap();
        s.draw_line(Point::new(7, 0), Point::new(9, 16), Color::RED)
            .unwrap();
    }
    assert_eq!(flat.to_rgba8().unwrap(), tiled.to_rgba8().unwrap());
}
