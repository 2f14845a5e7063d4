use crate::foundation::{core::Point, error::PixtileResult};
use crate::surface::Surface;

impl Surface {
    /// New surface of the mask's size holding `source` wherever the mask is not fully
    /// transparent.
    ///
    /// The source is sampled at `(x + offset.x, y + offset.y)` wrapped around its edges,
    /// so a small source tiles across a larger mask. Pixels under a zero-alpha mask stay
    /// transparent. The result shares the source's tile size and blend mode.
    pub fn masked(source: &Surface, mask: &Surface, offset: Point) -> PixtileResult<Surface> {
        source.ensure_alive("masked source")?;
        mask.ensure_alive("masked mask")?;

        let mut out = source.create_like(mask.width(), mask.height())?;
        let (sw, sh) = (source.width(), source.height());
        for y in 0..mask.height() {
            let sy = (y + offset.y).rem_euclid(sh);
            for x in 0..mask.width() {
                if mask.get_pixel_fast(x, y).a == 0 {
                    continue;
                }
                let sx = (x + offset.x).rem_euclid(sw);
                out.set_pixel_fast(x, y, source.get_pixel_fast(sx, sy));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/mask.rs"]
mod tests;
