use crate::composite::blend::{BlendMode, Rgba8, blend_pixel, blend_row_in_place};
use crate::foundation::{
    color::Color,
    core::{Point, Rect, Size},
    error::{PixtileError, PixtileResult},
    math::scale_i32,
};
use crate::surface::{Storage, Surface, buffer::PixelBuffer, tiling::TileGrid};

/// Full destination and source rectangles of one build call, in logical coordinates.
///
/// Recursion into tiles only narrows the region being written; the mapping from a
/// destination pixel back to its source pixel always uses the full rectangles, so flat
/// and tiled paths pick identical source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Mapping {
    pub(crate) dest: Rect,
    pub(crate) src: Rect,
}

impl Mapping {
    fn is_unscaled(self) -> bool {
        self.dest.same_size(self.src)
    }

    fn source_x(self, dx: i32) -> i32 {
        self.src.x + scale_i32(dx - self.dest.x, self.src.width, self.dest.width)
    }

    fn source_y(self, dy: i32) -> i32 {
        self.src.y + scale_i32(dy - self.dest.y, self.src.height, self.dest.height)
    }
}

enum Sampler<'a> {
    Buffer {
        pixels: &'a PixelBuffer,
        origin: Point,
    },
    Grid(&'a TileGrid),
    Solid(Color),
}

impl Sampler<'_> {
    fn sample(&self, x: i32, y: i32) -> Rgba8 {
        match self {
            Sampler::Buffer { pixels, origin } => pixels.get_raw(x - origin.x, y - origin.y),
            Sampler::Grid(grid) => {
                let tile = &grid.tiles()[grid.locate(x, y)];
                let o = tile.origin();
                tile.pixels().get_raw(x - o.x, y - o.y)
            }
            Sampler::Solid(c) => c.to_array(),
        }
    }
}

/// Clips `dest` to `bounds`, shrinking `src` by the overflow scaled to the source size.
///
/// Fails when either rectangle is empty before or after clipping.
pub(crate) fn clip_to_bounds(bounds: Size, dest: Rect, src: Rect) -> PixtileResult<(Rect, Rect)> {
    if dest.is_empty() || src.is_empty() {
        return Err(PixtileError::out_of_bounds(format!(
            "build with empty rectangle: dest {dest:?}, source {src:?}"
        )));
    }

    // Clipping runs on 64-bit edges.
    let wide = |r: Rect| [r.x, r.y, r.width, r.height].map(i64::from);
    let [mut dx, mut dy, mut dw, mut dh] = wide(dest);
    let [mut sx, mut sy, mut sw, mut sh] = wide(src);
    let scale_x = |over: i64| over * i64::from(src.width) / i64::from(dest.width);
    let scale_y = |over: i64| over * i64::from(src.height) / i64::from(dest.height);

    if dx < 0 {
        let over = -dx;
        dx = 0;
        dw -= over;
        sx += scale_x(over);
        sw -= scale_x(over);
    }
    if dy < 0 {
        let over = -dy;
        dy = 0;
        dh -= over;
        sy += scale_y(over);
        sh -= scale_y(over);
    }
    let over_right = dx + dw - i64::from(bounds.width);
    if over_right > 0 {
        dw -= over_right;
        sw -= scale_x(over_right);
    }
    let over_bottom = dy + dh - i64::from(bounds.height);
    if over_bottom > 0 {
        dh -= over_bottom;
        sh -= scale_y(over_bottom);
    }

    let narrow = |v: [i64; 4]| -> Option<Rect> {
        let [x, y, w, h] = v.map(|n| i32::try_from(n).ok());
        Some(Rect::new(x?, y?, w?, h?))
    };
    let (Some(d), Some(s)) = (narrow([dx, dy, dw, dh]), narrow([sx, sy, sw, sh])) else {
        return Err(PixtileError::out_of_bounds(format!(
            "build rectangles out of range after clipping dest {dest:?}, source {src:?}"
        )));
    };

    if d.is_empty() || s.is_empty() {
        return Err(PixtileError::out_of_bounds(format!(
            "nothing to draw after clipping dest {dest:?} to {}x{}",
            bounds.width, bounds.height
        )));
    }
    Ok((d, s))
}

impl Surface {
    /// Composites `source_rect` of `source` onto `dest` of this surface.
    ///
    /// The destination is clipped to this surface first and the source rectangle shrinks
    /// with it. Differently sized rectangles scale by nearest-pixel sampling. An empty
    /// result, a source rectangle outside `source`, a locked or disposed surface all fail.
    pub fn build(
        &mut self,
        dest: Rect,
        source: &Surface,
        source_rect: Rect,
        blend: BlendMode,
    ) -> PixtileResult<()> {
        let (dest, source_rect) = clip_to_bounds(self.size(), dest, source_rect)?;
        self.check_rect(dest)?;
        source.ensure_alive("build source")?;
        if !source.bounds().contains_rect(source_rect) {
            return Err(PixtileError::out_of_bounds(format!(
                "source rectangle {source_rect:?} outside {}x{} source",
                source.width(),
                source.height()
            )));
        }
        self.ensure_writable("build")?;

        self.build_clipped(
            Mapping {
                dest,
                src: source_rect,
            },
            source,
            blend,
        )?;
        self.signal_refresh();
        Ok(())
    }

    /// Builds all of `source` at `pos` with this surface's default blend mode.
    pub fn build_at(&mut self, pos: Point, source: &Surface) -> PixtileResult<()> {
        let dest = Rect::from_origin_size(pos, source.size());
        self.build(dest, source, source.bounds(), self.blend_mode())
    }

    /// Dispatch on the destination representation. Rectangles are already validated.
    pub(crate) fn build_clipped(
        &mut self,
        map: Mapping,
        source: &Surface,
        blend: BlendMode,
    ) -> PixtileResult<()> {
        match &mut self.storage {
            Storage::Tiled(grid) => {
                for part in grid.partition(map.dest, map.src) {
                    let tile = grid.tile_mut(part.index);
                    let origin = tile.origin();
                    compose_into(tile.pixels_mut(), origin, part.logical, map, source, blend)?;
                }
                Ok(())
            }
            Storage::Flat(buf) => compose_into(buf, Point::ORIGIN, map.dest, map, source, blend),
            Storage::Solid(_) => Err(PixtileError::unsupported(
                "build onto a solid color surface",
            )),
            Storage::Released => Err(PixtileError::state("build onto a disposed surface")),
        }
    }
}

/// Writes `region` (logical coordinates inside the flat `dst`) from `source`.
fn compose_into(
    dst: &mut PixelBuffer,
    dst_origin: Point,
    region: Rect,
    map: Mapping,
    source: &Surface,
    blend: BlendMode,
) -> PixtileResult<()> {
    match &source.storage {
        Storage::Flat(pixels) => {
            let sampler = Sampler::Buffer {
                pixels,
                origin: Point::ORIGIN,
            };
            composite_region(dst, dst_origin, region, map, &sampler, blend);
        }
        Storage::Solid(c) => {
            composite_region(dst, dst_origin, region, map, &Sampler::Solid(*c), blend);
        }
        Storage::Tiled(grid) if map.is_unscaled() => {
            let src_region = region.translate(map.src.x - map.dest.x, map.src.y - map.dest.y);
            for part in grid.partition(src_region, region) {
                let tile = &grid.tiles()[part.index];
                let sampler = Sampler::Buffer {
                    pixels: tile.pixels(),
                    origin: tile.origin(),
                };
                composite_region(dst, dst_origin, part.counterpart, map, &sampler, blend);
            }
        }
        Storage::Tiled(grid) => {
            composite_region(dst, dst_origin, region, map, &Sampler::Grid(grid), blend);
        }
        Storage::Released => {
            return Err(PixtileError::state("build from a disposed surface"));
        }
    }
    Ok(())
}

fn composite_region(
    dst: &mut PixelBuffer,
    dst_origin: Point,
    region: Rect,
    map: Mapping,
    sampler: &Sampler<'_>,
    blend: BlendMode,
) {
    let local = region.translate(-dst_origin.x, -dst_origin.y);

    if map.is_unscaled() {
        let sx0 = region.x + (map.src.x - map.dest.x);
        let sy0 = region.y + (map.src.y - map.dest.y);
        match sampler {
            Sampler::Buffer { pixels, origin } => {
                for row in 0..region.height {
                    let src = pixels.row(sy0 + row - origin.y, sx0 - origin.x, region.width);
                    let dst_row = dst.row_mut(local.y + row, local.x, local.width);
                    blend_row_in_place(dst_row, src, blend);
                }
                return;
            }
            Sampler::Solid(c) if blend == BlendMode::None => {
                dst.fill_rect(local, *c);
                return;
            }
            _ => {}
        }
    }

    for row in 0..region.height {
        let dy = region.y + row;
        let sy = map.source_y(dy);
        for col in 0..region.width {
            let dx = region.x + col;
            let s = sampler.sample(map.source_x(dx), sy);
            let (lx, ly) = (local.x + col, local.y + row);
            let out = blend_pixel(dst.get_raw(lx, ly), s, blend);
            dst.set_raw(lx, ly, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/build.rs"]
mod tests;
