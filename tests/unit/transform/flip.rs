use super::*;
use crate::foundation::error::PixtileError;
use crate::surface::opts::SurfaceOpts;

fn pattern(w: i32, h: i32, tile: i32) -> Surface {
    let mut s =
        Surface::with_opts(w, h, &SurfaceOpts::default().with_tile_size(tile, tile)).unwrap();
    for y in 0..h {
        for x in 0..w {
            s.set_pixel_fast(x, y, Color::rgb(x as u8, y as u8, 1));
        }
    }
    s
}

#[test]
fn vertical_flip_mirrors_rows() {
    for tile in [64, 3] {
        let mut s = pattern(5, 7, tile);
        s.flip_vertical().unwrap();
        for y in 0..7 {
            for x in 0..5 {
                assert_eq!(s.get_pixel(x, y).unwrap(), Color::rgb(x as u8, (6 - y) as u8, 1));
            }
        }
    }
}

#[test]
fn horizontal_flip_mirrors_columns() {
    for tile in [64, 4] {
        let mut s = pattern(9, 4, tile);
        s.flip_horizontal().unwrap();
        for y in 0..4 {
            for x in 0..9 {
                assert_eq!(s.get_pixel(x, y).unwrap(), Color::rgb((8 - x) as u8, y as u8, 1));
            }
        }
    }
}

#[test]
fn region_flip_leaves_outside_pixels_alone() {
    let mut s = pattern(8, 8, 64);
    let region = Rect::new(2, 1, 4, 5);
    s.flip_horizontal_region(region).unwrap();
    s.flip_vertical_region(region).unwrap();

    for y in 0..8 {
        for x in 0..8 {
            let want = if region.contains_point(x, y) {
                Color::rgb((2 + 5 - x) as u8, (1 + 5 - y) as u8, 1)
            } else {
                Color::rgb(x as u8, y as u8, 1)
            };
            assert_eq!(s.get_pixel(x, y).unwrap(), want, "({x},{y})");
        }
    }
}

#[test]
fn double_flip_is_identity() {
    let mut s = pattern(6, 5, 2);
    let before = s.to_rgba8().unwrap();
    s.flip_horizontal().unwrap();
    s.flip_horizontal().unwrap();
    s.flip_vertical().unwrap();
    s.flip_vertical().unwrap();
    assert_eq!(s.to_rgba8().unwrap(), before);
}

#[test]
fn flip_region_must_be_in_bounds() {
    let mut s = pattern(4, 4, 64);
    assert!(matches!(
        s.flip_vertical_region(Rect::new(1, 1, 4, 2)),
        Err(PixtileError::OutOfBounds(_))
    ));
}
