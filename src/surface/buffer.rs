use crate::foundation::{
    color::Color,
    core::{Rect, Size},
    error::{PixtileError, PixtileResult},
};

/// Contiguous row-major RGBA8 pixel storage with no row padding.
///
/// Coordinates are local to the buffer. Accessors index slices directly, so an
/// out-of-range coordinate panics instead of touching foreign memory; callers
/// bounds-check first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

pub(crate) fn rgba8_len(size: Size) -> PixtileResult<usize> {
    if size.is_empty() {
        return Err(PixtileError::misuse(format!(
            "surface size must be positive, got {}x{}",
            size.width, size.height
        )));
    }
    (size.width as usize)
        .checked_mul(size.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PixtileError::resource("pixel buffer size overflow"))
}

/// `len` copies of `fill`, reporting allocation failure as [`PixtileError::Resource`].
pub(crate) fn try_filled_vec<T: Clone>(len: usize, fill: T, what: &str) -> PixtileResult<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| PixtileError::resource(format!("allocate {what}: {e}")))?;
    data.resize(len, fill);
    Ok(data)
}

impl PixelBuffer {
    /// Allocates a transparent buffer.
    pub(crate) fn new(width: i32, height: i32) -> PixtileResult<Self> {
        let len = rgba8_len(Size::new(width, height))?;
        let data = try_filled_vec(len, 0u8, &format!("{width}x{height} pixel buffer"))?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wraps caller-supplied RGBA8 memory without copying.
    pub(crate) fn from_raw(width: i32, height: i32, data: Vec<u8>) -> PixtileResult<Self> {
        let len = rgba8_len(Size::new(width, height))?;
        if data.len() != len {
            return Err(PixtileError::misuse(format!(
                "rgba8 buffer for {width}x{height} must be {len} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds().contains_point(x, y), "({x},{y}) outside buffer");
        (y as usize * self.width as usize + x as usize) * 4
    }

    #[inline]
    pub(crate) fn get_raw(&self, x: i32, y: i32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub(crate) fn set_raw(&mut self, x: i32, y: i32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    pub fn get(&self, x: i32, y: i32) -> Color {
        Color::from_array(self.get_raw(x, y))
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, color: Color) {
        self.set_raw(x, y, color.to_array());
    }

    /// Bytes of `width` pixels of row `y` starting at column `x`.
    pub(crate) fn row(&self, y: i32, x: i32, width: i32) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + width as usize * 4]
    }

    pub(crate) fn row_mut(&mut self, y: i32, x: i32, width: i32) -> &mut [u8] {
        let start = self.offset(x, y);
        &mut self.data[start..start + width as usize * 4]
    }

    /// Fills a local rectangle that the caller has already clipped to the buffer.
    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Color) {
        let px = color.to_array();
        for y in rect.y..rect.bottom() {
            for chunk in self.row_mut(y, rect.x, rect.width).chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    pub(crate) fn fill(&mut self, color: Color) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
