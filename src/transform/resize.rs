use crate::composite::{blend::BlendMode, build::Mapping};
use crate::foundation::{core::Rect, error::PixtileResult};
use crate::surface::Surface;

impl Surface {
    /// Crops or pads to `width x height`, keeping the top-left content unscaled.
    ///
    /// New storage is allocated with this surface's tile size, so crossing the tile
    /// threshold retiles. Identity, renderer, font and blend mode are kept.
    #[tracing::instrument(skip(self), fields(id = %self.id()))]
    pub fn resize(&mut self, width: i32, height: i32) -> PixtileResult<()> {
        self.ensure_writable("resize")?;
        let mut next = self.create_like(width, height)?;
        let keep = Rect::new(0, 0, width.min(self.width()), height.min(self.height()));
        next.build_clipped(
            Mapping {
                dest: keep,
                src: keep,
            },
            self,
            BlendMode::None,
        )?;
        self.adopt(next);
        Ok(())
    }

    /// Scales the whole content to `width x height` with nearest-pixel sampling.
    #[tracing::instrument(skip(self), fields(id = %self.id()))]
    pub fn resize_scaled(&mut self, width: i32, height: i32) -> PixtileResult<()> {
        self.ensure_writable("resize_scaled")?;
        let mut next = self.create_like(width, height)?;
        next.build_clipped(
            Mapping {
                dest: next.bounds(),
                src: self.bounds(),
            },
            self,
            BlendMode::None,
        )?;
        self.adopt(next);
        Ok(())
    }

    fn adopt(&mut self, mut next: Surface) {
        let size = next.size();
        let storage = next.take_storage();
        self.replace_storage(size, storage);
        self.signal_refresh();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
