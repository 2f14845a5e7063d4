//! Text entry points. Glyph shaping and rasterization live behind [`Font`]; this module
//! only places the rasterized surface and composites it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::composite::blend::BlendMode;
use crate::foundation::{
    color::Color,
    core::{Point, Rect, Size},
    error::{PixtileError, PixtileResult},
};
use crate::surface::Surface;

/// A loaded font face at one point size.
pub trait Font {
    fn name(&self) -> &str;

    fn point_size(&self) -> u32;

    /// Pixel extent `text` would occupy when rasterized.
    fn measure(&self, text: &str) -> Size;

    /// Rasterizes `text` in `color` into a new flat surface sized like [`Font::measure`].
    fn rasterize(&self, text: &str, color: Color) -> PixtileResult<Surface>;
}

/// Horizontal anchor of the text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn origin_x(self, x: i32, width: i32) -> i32 {
        match self {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2,
            TextAlign::Right => x - width,
        }
    }
}

/// Loaded fonts keyed by `(name, point_size)`.
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<(String, u32), Rc<dyn Font>>,
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("len", &self.fonts.len())
            .finish()
    }
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached face, calling `load` only on a miss. A failed load caches nothing.
    pub fn get_or_load<F>(
        &mut self,
        name: &str,
        point_size: u32,
        load: F,
    ) -> PixtileResult<Rc<dyn Font>>
    where
        F: FnOnce() -> PixtileResult<Rc<dyn Font>>,
    {
        let key = (name.to_owned(), point_size);
        if let Some(font) = self.fonts.get(&key) {
            return Ok(Rc::clone(font));
        }
        let font = load()?;
        tracing::debug!(name, point_size, "font loaded");
        self.fonts.insert(key, Rc::clone(&font));
        Ok(font)
    }

    pub fn get(&self, name: &str, point_size: u32) -> Option<Rc<dyn Font>> {
        self.fonts.get(&(name.to_owned(), point_size)).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }
}

impl Surface {
    /// Size `text` would take with the attached font.
    pub fn measure_text(&self, text: &str) -> PixtileResult<Size> {
        let font = self.font().ok_or_else(|| {
            PixtileError::misuse(format!("measure_text: {} has no font", self.id()))
        })?;
        Ok(font.measure(text))
    }

    /// Rasterizes `text` with the attached font and adds it onto the surface at `pos`.
    ///
    /// `align` picks which point of the text's top edge sits at `pos`. Glyphs are
    /// composited with [`BlendMode::Addition`] so overlapping strokes accumulate.
    #[tracing::instrument(skip(self, text), fields(id = %self.id(), len = text.len()))]
    pub fn draw_text(
        &mut self,
        text: &str,
        pos: Point,
        color: Color,
        align: TextAlign,
    ) -> PixtileResult<()> {
        self.ensure_writable("draw_text")?;
        let font = self.font().cloned().ok_or_else(|| {
            PixtileError::misuse(format!("draw_text: {} has no font", self.id()))
        })?;
        if text.is_empty() {
            return Ok(());
        }

        let extent = font.measure(text);
        let mut glyphs = font.rasterize(text, color)?;
        let dest = Rect::new(
            align.origin_x(pos.x, extent.width),
            pos.y,
            glyphs.width(),
            glyphs.height(),
        );
        let result = self.build(dest, &glyphs, glyphs.bounds(), BlendMode::Addition);
        glyphs.dispose();
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/mod.rs"]
mod tests;
