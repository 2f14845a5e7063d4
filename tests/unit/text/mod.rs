use std::cell::Cell;

use super::*;

/// Fixed-pitch test face: every character is a 3x5 block.
struct BlockFont {
    size: u32,
}

impl Font for BlockFont {
    fn name(&self) -> &str {
        "block"
    }

    fn point_size(&self) -> u32 {
        self.size
    }

    fn measure(&self, text: &str) -> Size {
        Size::new(3 * text.chars().count() as i32, 5)
    }

    fn rasterize(&self, text: &str, color: Color) -> PixtileResult<Surface> {
        let size = self.measure(text);
        let mut s = Surface::new(size.width, size.height)?;
        s.clear(color)?;
        Ok(s)
    }
}

fn with_font(w: i32, h: i32) -> Surface {
    let mut s = Surface::new(w, h).unwrap();
    s.set_font(Some(Rc::new(BlockFont { size: 12 })));
    s
}

fn lit_columns(s: &Surface, y: i32) -> Vec<i32> {
    (0..s.width())
        .filter(|&x| s.get_pixel(x, y).unwrap() != Color::TRANSPARENT)
        .collect()
}

#[test]
fn alignment_moves_the_origin() {
    let mut left = with_font(20, 6);
    left.draw_text("ab", Point::new(10, 0), Color::RED, TextAlign::Left)
        .unwrap();
    assert_eq!(lit_columns(&left, 0), (10..16).collect::<Vec<_>>());

    let mut center = with_font(20, 6);
    center
        .draw_text("ab", Point::new(10, 0), Color::RED, TextAlign::Center)
        .unwrap();
    assert_eq!(lit_columns(&center, 0), (7..13).collect::<Vec<_>>());

    let mut right = with_font(20, 6);
    right
        .draw_text("ab", Point::new(10, 0), Color::RED, TextAlign::Right)
        .unwrap();
    assert_eq!(lit_columns(&right, 0), (4..10).collect::<Vec<_>>());
}

#[test]
fn repeated_text_accumulates() {
    let mut s = with_font(10, 10);
    let dim = Color::rgba(50, 0, 0, 100);
    s.draw_text("x", Point::new(1, 1), dim, TextAlign::Left).unwrap();
    s.draw_text("x", Point::new(1, 1), dim, TextAlign::Left).unwrap();
    assert_eq!(s.get_pixel(2, 2).unwrap(), Color::rgba(100, 0, 0, 200));
}

#[test]
fn text_is_clipped_at_the_edge() {
    let mut s = with_font(8, 4);
    s.draw_text("abc", Point::new(2, 1), Color::WHITE, TextAlign::Left)
        .unwrap();
    assert_eq!(lit_columns(&s, 3), (2..8).collect::<Vec<_>>());
}

#[test]
fn missing_font_is_misuse_and_empty_text_is_a_no_op() {
    let mut bare = Surface::new(4, 4).unwrap();
    assert!(matches!(
        bare.draw_text("a", Point::ORIGIN, Color::RED, TextAlign::Left),
        Err(PixtileError::Misuse(_))
    ));
    assert!(matches!(bare.measure_text("a"), Err(PixtileError::Misuse(_))));

    let mut s = with_font(4, 4);
    s.draw_text("", Point::new(100, 100), Color::RED, TextAlign::Left)
        .unwrap();
    assert_eq!(s.measure_text("abcd").unwrap(), Size::new(12, 5));
}

#[test]
fn cache_loads_each_face_once() {
    let mut cache = FontCache::new();
    let loads = Cell::new(0);
    let load = |size: u32| -> PixtileResult<Rc<dyn Font>> {
        loads.set(loads.get() + 1);
        Ok(Rc::new(BlockFont { size }) as Rc<dyn Font>)
    };

    let a = cache.get_or_load("block", 12, || load(12)).unwrap();
    let b = cache.get_or_load("block", 12, || load(12)).unwrap();
    cache.get_or_load("block", 16, || load(16)).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(loads.get(), 2);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("block", 16).unwrap().point_size(), 16);
    assert!(cache.get("block", 9).is_none());

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn failed_load_is_not_cached() {
    let mut cache = FontCache::new();
    let loaded = cache.get_or_load("missing", 10, || Err(PixtileError::resource("no such face")));
    assert!(matches!(loaded, Err(PixtileError::Resource(_))));
    assert!(cache.is_empty());
}
