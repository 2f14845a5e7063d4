use crate::foundation::{color::Color, core::Point, error::PixtileResult};
use crate::surface::Surface;

impl Surface {
    /// Draws a 1-pixel line between two in-bounds endpoints.
    ///
    /// Both axes are swept, so steep and shallow lines are equally continuous.
    pub fn draw_line(&mut self, p1: Point, p2: Point, color: Color) -> PixtileResult<()> {
        self.ensure_writable("draw_line")?;
        self.check_point(p1.x, p1.y)?;
        self.check_point(p2.x, p2.y)?;
        self.plot_line(p1, p2, color);
        self.signal_refresh();
        Ok(())
    }

    /// Line body without checks; both endpoints must already be in bounds.
    pub(crate) fn plot_line(&mut self, p1: Point, p2: Point, color: Color) {
        if p1 == p2 {
            self.set_pixel_fast(p1.x, p1.y, color);
            return;
        }

        if p1.x != p2.x {
            let span = f64::from(p2.x - p1.x);
            for x in p1.x.min(p2.x)..=p1.x.max(p2.x) {
                let p = Point::lerp(p1, p2, f64::from(x - p1.x) / span);
                self.set_pixel_fast(x, p.y, color);
            }
        }
        if p1.y != p2.y {
            let span = f64::from(p2.y - p1.y);
            for y in p1.y.min(p2.y)..=p1.y.max(p2.y) {
                let p = Point::lerp(p1, p2, f64::from(y - p1.y) / span);
                self.set_pixel_fast(p.x, y, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/line.rs"]
mod tests;
