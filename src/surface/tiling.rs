use crate::foundation::{
    core::{Point, Rect, Size},
    error::{PixtileError, PixtileResult},
};
use crate::surface::buffer::PixelBuffer;

/// Number of `tile`-sized spans covering `len`; both are positive.
fn span_count(len: i32, tile: i32) -> i32 {
    len.unsigned_abs().div_ceil(tile.unsigned_abs()) as i32
}

/// One bounded-size flat piece of a tiled surface.
#[derive(Clone, Debug)]
pub struct Tile {
    origin: Point,
    pixels: PixelBuffer,
}

impl Tile {
    /// Top-left corner of the tile in the parent's logical space.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.pixels.size()
    }

    /// Logical rectangle covered by the tile.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.pixels.size())
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }
}

/// One tile's share of a partitioned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePart {
    /// Index into [`TileGrid::tiles`].
    pub index: usize,
    /// Intersection of the partitioned rectangle with the tile, in logical coordinates.
    pub logical: Rect,
    /// The same intersection in tile-local coordinates.
    pub local: Rect,
    /// Matching sub-rectangle of the counterpart partitioned in lock-step.
    pub counterpart: Rect,
}

/// Row-major grid of tiles exactly covering `[0, 0, width, height]`.
#[derive(Clone, Debug)]
pub struct TileGrid {
    size: Size,
    tile_size: Size,
    columns: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Whether a surface of `size` must be split for `tile_size`.
    pub fn needs_tiling(size: Size, tile_size: Size) -> bool {
        size.width > tile_size.width || size.height > tile_size.height
    }

    pub(crate) fn new(size: Size, tile_size: Size) -> PixtileResult<Self> {
        if tile_size.is_empty() {
            return Err(PixtileError::misuse(format!(
                "tile size must be positive, got {}x{}",
                tile_size.width, tile_size.height
            )));
        }
        if size.is_empty() {
            return Err(PixtileError::misuse(format!(
                "surface size must be positive, got {}x{}",
                size.width, size.height
            )));
        }

        let columns = span_count(size.width, tile_size.width);
        let rows = span_count(size.height, tile_size.height);
        let count = usize::try_from(columns)
            .ok()
            .zip(usize::try_from(rows).ok())
            .and_then(|(c, r)| c.checked_mul(r))
            .ok_or_else(|| PixtileError::resource("tile count overflow"))?;
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(count).map_err(|e| {
            PixtileError::resource(format!("allocate {columns}x{rows} tile grid: {e}"))
        })?;
        for row in 0..rows {
            for col in 0..columns {
                let origin = Point::new(col * tile_size.width, row * tile_size.height);
                let w = tile_size.width.min(size.width - origin.x);
                let h = tile_size.height.min(size.height - origin.y);
                tiles.push(Tile {
                    origin,
                    pixels: PixelBuffer::new(w, h)?,
                });
            }
        }

        Ok(Self {
            size,
            tile_size,
            columns,
            rows,
            tiles,
        })
    }

    /// Splits contiguous logical RGBA8 rows into a new grid.
    pub(crate) fn from_rgba(size: Size, tile_size: Size, data: &[u8]) -> PixtileResult<Self> {
        let mut grid = Self::new(size, tile_size)?;
        grid.write_rect(Rect::from_size(size), data);
        Ok(grid)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub(crate) fn tile_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    /// Index of the tile owning logical `(x, y)`. The caller bounds-checks first.
    pub fn locate(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            Rect::from_size(self.size).contains_point(x, y),
            "({x},{y}) outside tiled surface"
        );
        let col = x / self.tile_size.width;
        let row = y / self.tile_size.height;
        (row * self.columns + col) as usize
    }

    /// Splits `logical` across every overlapping tile.
    ///
    /// `counterpart` is partitioned in lock-step: each part's counterpart keeps the same
    /// offset from `counterpart`'s origin as the part has from `logical`'s origin.
    pub fn partition(&self, logical: Rect, counterpart: Rect) -> Vec<TilePart> {
        let Some(clipped) = logical.intersect(Rect::from_size(self.size)) else {
            return Vec::new();
        };

        let first_col = clipped.x / self.tile_size.width;
        let last_col = (clipped.right() - 1) / self.tile_size.width;
        let first_row = clipped.y / self.tile_size.height;
        let last_row = (clipped.bottom() - 1) / self.tile_size.height;

        let mut parts = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let index = (row * self.columns + col) as usize;
                let tile = &self.tiles[index];
                let Some(inter) = clipped.intersect(tile.rect()) else {
                    continue;
                };
                parts.push(TilePart {
                    index,
                    logical: inter,
                    local: inter.translate(-tile.origin.x, -tile.origin.y),
                    counterpart: Rect::new(
                        counterpart.x + (inter.x - logical.x),
                        counterpart.y + (inter.y - logical.y),
                        inter.width,
                        inter.height,
                    ),
                });
            }
        }
        parts
    }

    /// Copies a logical rectangle into contiguous rows, tile by tile.
    pub(crate) fn read_rect(&self, rect: Rect, out: &mut [u8]) {
        let stride = rect.width as usize * 4;
        for part in self.partition(rect, Rect::from_size(rect.size())) {
            let tile = &self.tiles[part.index];
            for row in 0..part.local.height {
                let src = tile
                    .pixels
                    .row(part.local.y + row, part.local.x, part.local.width);
                let start = (part.counterpart.y + row) as usize * stride
                    + part.counterpart.x as usize * 4;
                out[start..start + src.len()].copy_from_slice(src);
            }
        }
    }

    /// Scatters contiguous rows back into a logical rectangle, tile by tile.
    pub(crate) fn write_rect(&mut self, rect: Rect, data: &[u8]) {
        let stride = rect.width as usize * 4;
        for part in self.partition(rect, Rect::from_size(rect.size())) {
            let tile = &mut self.tiles[part.index];
            for row in 0..part.local.height {
                let start = (part.counterpart.y + row) as usize * stride
                    + part.counterpart.x as usize * 4;
                let len = part.local.width as usize * 4;
                tile.pixels
                    .row_mut(part.local.y + row, part.local.x, part.local.width)
                    .copy_from_slice(&data[start..start + len]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/tiling.rs"]
mod tests;
