use super::*;
use crate::surface::opts::SurfaceOpts;

fn rows(w: i32, h: i32, opts: &SurfaceOpts) -> Surface {
    let mut s = Surface::with_opts(w, h, opts).unwrap();
    for y in 0..h {
        s.fill_rect(Rect::new(0, y, w, 1), Color::rgb(y as u8 + 1, 0, 0))
            .unwrap();
    }
    s
}

fn row_tags(s: &Surface) -> Vec<u8> {
    (0..s.height()).map(|y| s.get_pixel(s.width() - 1, y).unwrap().r).collect()
}

#[test]
fn shift_down_with_clear() {
    let mut s = rows(3, 8, &SurfaceOpts::default());
    s.shift_rows(1, 3, 2, true).unwrap();
    assert_eq!(row_tags(&s), vec![1, 0, 0, 2, 3, 4, 7, 8]);
}

#[test]
fn shift_up_without_clear_keeps_vacated_rows() {
    let mut s = rows(3, 8, &SurfaceOpts::default());
    s.shift_rows(4, 3, -3, false).unwrap();
    assert_eq!(row_tags(&s), vec![1, 5, 6, 7, 5, 6, 7, 8]);
}

#[test]
fn single_column_tiled_shift_matches_flat() {
    let opts = SurfaceOpts::default().with_tile_size(4, 3);
    let mut tiled = rows(4, 11, &opts);
    let mut flat = rows(4, 11, &SurfaceOpts::default());
    assert!(tiled.is_tiled());

    for s in [&mut tiled, &mut flat] {
        s.shift_rows(2, 5, 4, true).unwrap();
    }
    assert_eq!(tiled.to_rgba8().unwrap(), flat.to_rgba8().unwrap());
    assert_eq!(row_tags(&tiled), vec![1, 2, 0, 0, 0, 0, 3, 4, 5, 6, 7]);
}

#[test]
fn multi_column_tiled_shift_is_unsupported() {
    let opts = SurfaceOpts::default().with_tile_size(2, 3);
    let mut s = rows(4, 6, &opts);
    assert!(matches!(
        s.shift_rows(0, 2, 1, false),
        Err(PixtileError::Unsupported(_))
    ));
}

#[test]
fn destination_band_must_fit() {
    let mut s = rows(2, 5, &SurfaceOpts::default());
    assert!(matches!(
        s.shift_rows(2, 2, 2, false),
        Err(PixtileError::OutOfBounds(_))
    ));
    assert!(matches!(
        s.shift_rows(0, 0, 1, false),
        Err(PixtileError::OutOfBounds(_))
    ));
}

#[test]
fn overflowing_offset_is_out_of_bounds() {
    let mut s = rows(3, 8, &SurfaceOpts::default());
    for offset in [i32::MAX, i32::MIN] {
        assert!(matches!(
            s.shift_rows(2, 2, offset, false),
            Err(PixtileError::OutOfBounds(_))
        ));
    }
    assert_eq!(row_tags(&s), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}
