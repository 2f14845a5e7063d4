use std::collections::VecDeque;

use crate::foundation::{color::Color, core::Rect, error::PixtileResult};
use crate::surface::Surface;

impl Surface {
    pub fn flip_vertical(&mut self) -> PixtileResult<()> {
        self.flip_vertical_region(self.bounds())
    }

    pub fn flip_horizontal(&mut self) -> PixtileResult<()> {
        self.flip_horizontal_region(self.bounds())
    }

    /// Mirrors the rows of `rect` top to bottom, swapping through one staged row.
    pub fn flip_vertical_region(&mut self, rect: Rect) -> PixtileResult<()> {
        self.ensure_writable("flip_vertical")?;
        self.check_rect(rect)?;

        let (mut top, mut bottom) = (rect.y, rect.bottom() - 1);
        while top < bottom {
            let staged = self.read_region(Rect::new(rect.x, top, rect.width, 1))?;
            for x in rect.x..rect.right() {
                let c = self.get_pixel_fast(x, bottom);
                self.set_pixel_fast(x, top, c);
            }
            self.write_region(Rect::new(rect.x, bottom, rect.width, 1), &staged);
            top += 1;
            bottom -= 1;
        }
        self.signal_refresh();
        Ok(())
    }

    /// Mirrors the columns of `rect` left to right, staging each left column in a queue.
    pub fn flip_horizontal_region(&mut self, rect: Rect) -> PixtileResult<()> {
        self.ensure_writable("flip_horizontal")?;
        self.check_rect(rect)?;

        let mut column: VecDeque<Color> = VecDeque::with_capacity(rect.height as usize);
        let (mut left, mut right) = (rect.x, rect.right() - 1);
        while left < right {
            column.extend((rect.y..rect.bottom()).map(|y| self.get_pixel_fast(left, y)));
            for y in rect.y..rect.bottom() {
                let c = self.get_pixel_fast(right, y);
                self.set_pixel_fast(left, y, c);
            }
            for y in rect.y..rect.bottom() {
                if let Some(c) = column.pop_front() {
                    self.set_pixel_fast(right, y, c);
                }
            }
            left += 1;
            right -= 1;
        }
        self.signal_refresh();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/flip.rs"]
mod tests;
