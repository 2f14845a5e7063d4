use crate::foundation::{
    color::Color,
    core::Rect,
    error::{PixtileError, PixtileResult},
};
use crate::surface::{Storage, Surface};

impl Surface {
    /// Moves the full-width band of rows `[y, y + height)` by `offset` rows.
    ///
    /// The band is gathered into one staging buffer before anything is written, so
    /// overlapping source and destination bands are safe. With `clear`, source rows not
    /// covered by the destination band become transparent. Tiled surfaces must have a
    /// single tile column.
    #[tracing::instrument(skip(self), fields(id = %self.id()))]
    pub fn shift_rows(
        &mut self,
        y: i32,
        height: i32,
        offset: i32,
        clear: bool,
    ) -> PixtileResult<()> {
        self.ensure_writable("shift_rows")?;
        let from = Rect::new(0, y, self.width(), height);
        self.check_rect(from)?;
        let to = from.checked_translate(0, offset).ok_or_else(|| {
            PixtileError::out_of_bounds(format!("shift_rows: offset {offset} overflows"))
        })?;
        self.check_rect(to)?;
        if let Storage::Tiled(grid) = &self.storage
            && grid.columns() > 1
        {
            return Err(PixtileError::unsupported(format!(
                "shift_rows: {} spans {} tile columns",
                self.id(),
                grid.columns()
            )));
        }
        if offset == 0 {
            return Ok(());
        }

        let staged = self.read_region(from)?;
        if clear {
            self.fill_region(from, Color::TRANSPARENT);
        }
        self.write_region(to, &staged);
        self.signal_refresh();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/shift.rs"]
mod tests;
