use crate::composite::{blend::BlendMode, build::Mapping};
use crate::foundation::{
    color::Color,
    error::{PixtileError, PixtileResult},
};
use crate::surface::{Storage, Surface, buffer::try_filled_vec};

/// How a blur treats window samples that fall outside the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurEdge {
    /// Off-surface samples count as transparent; the divisor is always the full window.
    #[default]
    Transparent,
    /// Only in-surface samples are averaged.
    Shrink,
}

/// Per-channel summed-area table over contiguous RGBA8 rows.
struct Integral {
    stride: usize,
    sums: Vec<[u64; 4]>,
}

impl Integral {
    fn new(width: i32, height: i32, rgba: &[u8]) -> PixtileResult<Self> {
        let (w, h) = (width as usize, height as usize);
        let stride = w + 1;
        let len = stride
            .checked_mul(h + 1)
            .ok_or_else(|| PixtileError::resource("summed-area table size overflow"))?;
        let mut sums = try_filled_vec(len, [0u64; 4], "summed-area table")?;
        for y in 0..h {
            let mut row = [0u64; 4];
            for x in 0..w {
                let px = &rgba[(y * w + x) * 4..(y * w + x) * 4 + 4];
                for c in 0..4 {
                    row[c] += u64::from(px[c]);
                    sums[(y + 1) * stride + x + 1][c] = sums[y * stride + x + 1][c] + row[c];
                }
            }
        }
        Ok(Self { stride, sums })
    }

    /// Channel sums over the half-open box `[x0, x1) x [y0, y1)`.
    fn sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> [u64; 4] {
        let at = |x: usize, y: usize| self.sums[y * self.stride + x];
        let (a, b, c, d) = (at(x1, y1), at(x0, y1), at(x1, y0), at(x0, y0));
        [0, 1, 2, 3].map(|i| a[i] + d[i] - b[i] - c[i])
    }
}

impl Surface {
    /// Applies `f` to every stored pixel, tile by tile.
    fn map_pixels(&mut self, mut f: impl FnMut(Color) -> Color) {
        let mut apply = |bytes: &mut [u8]| {
            for px in bytes.chunks_exact_mut(4) {
                let out = f(Color::rgba(px[0], px[1], px[2], px[3]));
                px.copy_from_slice(&out.to_array());
            }
        };
        match &mut self.storage {
            Storage::Flat(buf) => apply(buf.as_bytes_mut()),
            Storage::Tiled(grid) => {
                for i in 0..grid.len() {
                    apply(grid.tile_mut(i).pixels_mut().as_bytes_mut());
                }
            }
            Storage::Solid(_) | Storage::Released => {}
        }
    }

    /// Rotates the hue of every pixel by `degrees`, keeping saturation, value and alpha.
    pub fn rotate_hue(&mut self, degrees: f64) -> PixtileResult<()> {
        self.ensure_writable("rotate_hue")?;
        self.map_pixels(|c| c.rotate_hue(degrees));
        self.signal_refresh();
        Ok(())
    }

    /// Box blur over a `(2 * weight + 1)` square window. A zero weight leaves the pixels
    /// untouched.
    #[tracing::instrument(skip(self), fields(id = %self.id()))]
    pub fn blur(&mut self, weight: u32, edge: BlurEdge) -> PixtileResult<()> {
        self.ensure_writable("blur")?;
        if weight == 0 {
            return Ok(());
        }

        let bounds = self.bounds();
        let (w, h) = (bounds.width as usize, bounds.height as usize);
        let table = Integral::new(bounds.width, bounds.height, &self.read_region(bounds)?)?;
        let k = weight as usize;
        let full = ((2 * k + 1) * (2 * k + 1)) as u64;

        let mut out = try_filled_vec(w * h * 4, 0u8, "blur output")?;
        for y in 0..h {
            let (y0, y1) = (y.saturating_sub(k), (y + k + 1).min(h));
            for x in 0..w {
                let (x0, x1) = (x.saturating_sub(k), (x + k + 1).min(w));
                let sums = table.sum(x0, y0, x1, y1);
                let divisor = match edge {
                    BlurEdge::Transparent => full,
                    BlurEdge::Shrink => ((x1 - x0) * (y1 - y0)) as u64,
                };
                let i = (y * w + x) * 4;
                for c in 0..4 {
                    out[i + c] = div_round_u64(sums[c], divisor) as u8;
                }
            }
        }
        self.write_region(bounds, &out);
        self.signal_refresh();
        Ok(())
    }

    /// Adds a blurred copy of the pixels brighter than `threshold` back onto the surface.
    #[tracing::instrument(skip(self), fields(id = %self.id()))]
    pub fn bloom(&mut self, threshold: u8, weight: u32) -> PixtileResult<()> {
        self.ensure_writable("bloom")?;

        let mut bright = self.create_like(self.width(), self.height())?;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = self.get_pixel_fast(x, y);
                if c.luma() > threshold {
                    bright.set_pixel_fast(x, y, c);
                }
            }
        }
        let result = bright.blur(weight, BlurEdge::Shrink).and_then(|()| {
            self.build_clipped(
                Mapping {
                    dest: self.bounds(),
                    src: bright.bounds(),
                },
                &bright,
                BlendMode::Addition,
            )
        });
        bright.dispose();
        result?;

        self.signal_refresh();
        Ok(())
    }
}

fn div_round_u64(num: u64, den: u64) -> u64 {
    (num + den / 2) / den
}

#[cfg(test)]
#[path = "../../tests/unit/transform/filter.rs"]
mod tests;
