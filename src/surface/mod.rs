//! The surface ("bitmap"): a logical RGBA8 pixel plane stored flat, tiled, or as a
//! uniform color.
//!
//! Every public operation matches on `Storage` once. The tiling resolver in
//! [`tiling`] is the only code aware of tile boundaries; callers work in one logical
//! coordinate space regardless of representation.

pub mod buffer;
pub mod opts;
pub mod registry;
pub mod renderer;
pub mod tiling;

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::composite::blend::BlendMode;
use crate::foundation::{
    color::Color,
    core::{Rect, Size},
    error::{PixtileError, PixtileResult},
};
use crate::text::Font;

use buffer::PixelBuffer;
use opts::SurfaceOpts;
use registry::SurfaceRegistry;
use renderer::Renderer;
use tiling::{Tile, TileGrid};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique surface identifier, shared with the registry and renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

pub(crate) enum Storage {
    Flat(PixelBuffer),
    Tiled(TileGrid),
    Solid(Color),
    Released,
}

/// Public view of how a surface is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Representation {
    Flat,
    Tiled,
    Solid,
    Released,
}

/// A logical pixel plane of fixed size.
pub struct Surface {
    id: SurfaceId,
    size: Size,
    tile_size: Size,
    max_surface_bytes: u64,
    pub(crate) storage: Storage,
    locked: bool,
    blend_mode: BlendMode,
    renderer: Option<Rc<dyn Renderer>>,
    font: Option<Rc<dyn Font>>,
    registry: Option<Rc<SurfaceRegistry>>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("representation", &self.representation())
            .field("locked", &self.locked)
            .field("blend_mode", &self.blend_mode)
            .field("has_renderer", &self.renderer.is_some())
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl Surface {
    /// Transparent surface with default options.
    pub fn new(width: i32, height: i32) -> PixtileResult<Self> {
        Self::with_opts(width, height, &SurfaceOpts::default())
    }

    /// Transparent surface, tiled when either dimension exceeds `opts.tile_size`.
    pub fn with_opts(width: i32, height: i32, opts: &SurfaceOpts) -> PixtileResult<Self> {
        opts.validate()?;
        let size = Size::new(width, height);
        if !size.is_empty() {
            opts.check_surface_size(size)?;
        }
        let storage = if TileGrid::needs_tiling(size, opts.tile_size) {
            let grid = TileGrid::new(size, opts.tile_size)?;
            tracing::debug!(width, height, tiles = grid.len(), "creating tiled surface");
            Storage::Tiled(grid)
        } else {
            Storage::Flat(PixelBuffer::new(width, height)?)
        };
        Ok(Self::from_storage(size, opts, storage))
    }

    /// Wraps caller-supplied row-major RGBA8 memory. Oversized images are split into tiles.
    pub fn from_rgba8(
        width: i32,
        height: i32,
        data: Vec<u8>,
        opts: &SurfaceOpts,
    ) -> PixtileResult<Self> {
        opts.validate()?;
        let size = Size::new(width, height);
        if !size.is_empty() {
            opts.check_surface_size(size)?;
        }
        let storage = if TileGrid::needs_tiling(size, opts.tile_size) {
            let expected = buffer::rgba8_len(size)?;
            if data.len() != expected {
                return Err(PixtileError::misuse(format!(
                    "rgba8 buffer for {width}x{height} must be {expected} bytes, got {}",
                    data.len()
                )));
            }
            Storage::Tiled(TileGrid::from_rgba(size, opts.tile_size, &data)?)
        } else {
            Storage::Flat(PixelBuffer::from_raw(width, height, data)?)
        };
        Ok(Self::from_storage(size, opts, storage))
    }

    /// Uniform-color surface without a pixel buffer. It can be read and used as a build
    /// source; pixel writes fail with [`PixtileError::Unsupported`].
    pub fn solid(width: i32, height: i32, color: Color) -> PixtileResult<Self> {
        let size = Size::new(width, height);
        if size.is_empty() {
            return Err(PixtileError::misuse(format!(
                "surface size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self::from_storage(
            size,
            &SurfaceOpts::default(),
            Storage::Solid(color),
        ))
    }

    fn from_storage(size: Size, opts: &SurfaceOpts, storage: Storage) -> Self {
        Self {
            id: SurfaceId::next(),
            size,
            tile_size: opts.tile_size,
            max_surface_bytes: opts.max_surface_bytes,
            storage,
            locked: false,
            blend_mode: opts.blend_mode,
            renderer: None,
            font: None,
            registry: None,
        }
    }

    /// Options equivalent to the ones this surface was created with.
    pub fn opts(&self) -> SurfaceOpts {
        SurfaceOpts {
            tile_size: self.tile_size,
            blend_mode: self.blend_mode,
            max_surface_bytes: self.max_surface_bytes,
        }
    }

    /// Registers the surface with a leak-tracking registry.
    pub fn tracked(mut self, registry: &Rc<SurfaceRegistry>) -> Self {
        registry.register(self.id, self.size);
        self.registry = Some(Rc::clone(registry));
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    pub fn representation(&self) -> Representation {
        match self.storage {
            Storage::Flat(_) => Representation::Flat,
            Storage::Tiled(_) => Representation::Tiled,
            Storage::Solid(_) => Representation::Solid,
            Storage::Released => Representation::Released,
        }
    }

    pub fn is_tiled(&self) -> bool {
        matches!(self.storage, Storage::Tiled(_))
    }

    pub fn tile_grid(&self) -> Option<&TileGrid> {
        match &self.storage {
            Storage::Tiled(grid) => Some(grid),
            _ => None,
        }
    }

    /// Raw bytes of a flat surface.
    pub fn pixels(&self) -> Option<&[u8]> {
        match &self.storage {
            Storage::Flat(buf) => Some(buf.as_bytes()),
            _ => None,
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
    }

    pub fn attach_renderer(&mut self, renderer: Rc<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn detach_renderer(&mut self) -> Option<Rc<dyn Renderer>> {
        self.renderer.take()
    }

    pub fn font(&self) -> Option<&Rc<dyn Font>> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Option<Rc<dyn Font>>) {
        self.font = font;
    }

    // ---- lifecycle ----------------------------------------------------------

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.storage, Storage::Released)
    }

    /// Freezes the pixels and mirrors them into the attached renderer.
    pub fn lock(&mut self) -> PixtileResult<()> {
        self.ensure_alive("lock")?;
        if self.locked {
            return Err(PixtileError::state(format!("{} is already locked", self.id)));
        }
        self.locked = true;
        if let Some(renderer) = self.renderer.clone()
            && let Err(e) = renderer.mirror_to_texture(self)
        {
            self.locked = false;
            return Err(e);
        }
        Ok(())
    }

    pub fn unlock(&mut self) -> PixtileResult<()> {
        self.ensure_alive("unlock")?;
        if !self.locked {
            return Err(PixtileError::state(format!("{} is not locked", self.id)));
        }
        self.locked = false;
        if let Some(renderer) = &self.renderer {
            renderer.release_texture(self.id);
        }
        Ok(())
    }

    /// Releases the storage (every tile included). Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        if self.locked
            && let Some(renderer) = &self.renderer
        {
            renderer.release_texture(self.id);
        }
        self.locked = false;
        self.storage = Storage::Released;
        if let Some(registry) = &self.registry {
            registry.release(self.id);
        }
        tracing::trace!(id = %self.id, "surface disposed");
    }

    /// Moves the storage out, leaving this surface released without logging a leak.
    pub(crate) fn take_storage(&mut self) -> Storage {
        if let Some(registry) = &self.registry {
            registry.release(self.id);
        }
        std::mem::replace(&mut self.storage, Storage::Released)
    }

    /// Replaces storage and logical size, keeping identity, renderer and font.
    pub(crate) fn replace_storage(&mut self, size: Size, storage: Storage) {
        self.size = size;
        self.storage = storage;
        if let Some(registry) = &self.registry {
            registry.register(self.id, size);
        }
    }

    // ---- checks -------------------------------------------------------------

    pub(crate) fn ensure_alive(&self, op: &str) -> PixtileResult<()> {
        if self.is_disposed() {
            return Err(PixtileError::state(format!(
                "{op}: {} has been disposed",
                self.id
            )));
        }
        Ok(())
    }

    /// Alive, unlocked and backed by pixels.
    pub(crate) fn ensure_writable(&self, op: &str) -> PixtileResult<()> {
        self.ensure_alive(op)?;
        if self.locked {
            return Err(PixtileError::state(format!("{op}: {} is locked", self.id)));
        }
        if let Storage::Solid(_) = self.storage {
            return Err(PixtileError::unsupported(format!(
                "{op}: {} is a solid color surface",
                self.id
            )));
        }
        Ok(())
    }

    pub(crate) fn check_point(&self, x: i32, y: i32) -> PixtileResult<()> {
        if !self.bounds().contains_point(x, y) {
            return Err(PixtileError::out_of_bounds(format!(
                "({x},{y}) outside {}x{} surface",
                self.size.width, self.size.height
            )));
        }
        Ok(())
    }

    pub(crate) fn check_rect(&self, rect: Rect) -> PixtileResult<()> {
        if !self.bounds().contains_rect(rect) {
            return Err(PixtileError::out_of_bounds(format!(
                "{rect:?} outside {}x{} surface",
                self.size.width, self.size.height
            )));
        }
        Ok(())
    }

    pub(crate) fn signal_refresh(&self) {
        if let Some(renderer) = &self.renderer {
            renderer.refresh_signal();
        }
    }

    // ---- tiling resolver ----------------------------------------------------

    /// The tile owning logical `(x, y)` of a tiled surface.
    pub fn locate_tile(&self, x: i32, y: i32) -> PixtileResult<&Tile> {
        self.ensure_alive("locate_tile")?;
        self.check_point(x, y)?;
        match &self.storage {
            Storage::Tiled(grid) => Ok(&grid.tiles()[grid.locate(x, y)]),
            _ => Err(PixtileError::unsupported(format!(
                "locate_tile: {} is not tiled",
                self.id
            ))),
        }
    }

    // ---- pixel access -------------------------------------------------------

    pub fn get_pixel(&self, x: i32, y: i32) -> PixtileResult<Color> {
        self.ensure_alive("get_pixel")?;
        self.check_point(x, y)?;
        Ok(self.get_pixel_fast(x, y))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> PixtileResult<()> {
        self.ensure_writable("set_pixel")?;
        self.check_point(x, y)?;
        self.set_pixel_fast(x, y, color);
        self.signal_refresh();
        Ok(())
    }

    /// Unchecked read for callers that already validated the coordinate.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the surface storage. Reads from a released
    /// surface return transparent.
    pub fn get_pixel_fast(&self, x: i32, y: i32) -> Color {
        match &self.storage {
            Storage::Flat(buf) => buf.get(x, y),
            Storage::Tiled(grid) => {
                let tile = &grid.tiles()[grid.locate(x, y)];
                let o = tile.origin();
                tile.pixels().get(x - o.x, y - o.y)
            }
            Storage::Solid(c) => *c,
            Storage::Released => Color::TRANSPARENT,
        }
    }

    /// Unchecked write that skips the bounds, lock and disposal checks and does not signal
    /// the renderer.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the surface storage. Writes to solid or released
    /// surfaces are dropped.
    pub fn set_pixel_fast(&mut self, x: i32, y: i32, color: Color) {
        match &mut self.storage {
            Storage::Flat(buf) => buf.set(x, y, color),
            Storage::Tiled(grid) => {
                let idx = grid.locate(x, y);
                let tile = grid.tile_mut(idx);
                let o = tile.origin();
                tile.pixels_mut().set(x - o.x, y - o.y, color);
            }
            Storage::Solid(_) | Storage::Released => {}
        }
    }

    // ---- region helpers -----------------------------------------------------

    /// Fills an in-bounds logical rectangle, tile by tile when tiled.
    pub(crate) fn fill_region(&mut self, rect: Rect, color: Color) {
        match &mut self.storage {
            Storage::Flat(buf) => buf.fill_rect(rect, color),
            Storage::Tiled(grid) => {
                for part in grid.partition(rect, rect) {
                    grid.tile_mut(part.index)
                        .pixels_mut()
                        .fill_rect(part.local, color);
                }
            }
            Storage::Solid(_) | Storage::Released => {}
        }
    }

    /// Copies an in-bounds logical rectangle into contiguous RGBA8 rows.
    pub(crate) fn read_region(&self, rect: Rect) -> PixtileResult<Vec<u8>> {
        let len = buffer::rgba8_len(rect.size())?;
        let mut out = buffer::try_filled_vec(len, 0u8, "region staging buffer")?;
        match &self.storage {
            Storage::Flat(buf) => {
                let stride = rect.width as usize * 4;
                for (row, dst) in out.chunks_exact_mut(stride).enumerate() {
                    dst.copy_from_slice(buf.row(rect.y + row as i32, rect.x, rect.width));
                }
            }
            Storage::Tiled(grid) => grid.read_rect(rect, &mut out),
            Storage::Solid(c) => {
                let px = c.to_array();
                for chunk in out.chunks_exact_mut(4) {
                    chunk.copy_from_slice(&px);
                }
            }
            Storage::Released => {}
        }
        Ok(out)
    }

    /// Writes contiguous RGBA8 rows into an in-bounds logical rectangle.
    pub(crate) fn write_region(&mut self, rect: Rect, data: &[u8]) {
        match &mut self.storage {
            Storage::Flat(buf) => {
                let stride = rect.width as usize * 4;
                for (row, src) in data.chunks_exact(stride).enumerate() {
                    buf.row_mut(rect.y + row as i32, rect.x, rect.width)
                        .copy_from_slice(src);
                }
            }
            Storage::Tiled(grid) => grid.write_rect(rect, data),
            Storage::Solid(_) | Storage::Released => {}
        }
    }

    /// Whole surface as one contiguous RGBA8 buffer, gathering tiles.
    pub fn to_rgba8(&self) -> PixtileResult<Vec<u8>> {
        self.ensure_alive("to_rgba8")?;
        self.read_region(self.bounds())
    }

    /// Fills the whole surface with one color.
    pub fn clear(&mut self, color: Color) -> PixtileResult<()> {
        self.ensure_writable("clear")?;
        match &mut self.storage {
            Storage::Flat(buf) => buf.fill(color),
            Storage::Tiled(grid) => {
                for i in 0..grid.len() {
                    grid.tile_mut(i).pixels_mut().fill(color);
                }
            }
            Storage::Solid(_) | Storage::Released => {}
        }
        self.signal_refresh();
        Ok(())
    }

    /// Creates an empty sibling surface sharing this surface's tile size and blend mode.
    pub(crate) fn create_like(&self, width: i32, height: i32) -> PixtileResult<Self> {
        Self::with_opts(width, height, &self.opts())
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if matches!(self.storage, Storage::Flat(_) | Storage::Tiled(_)) {
            tracing::warn!(
                id = %self.id,
                width = self.size.width,
                height = self.size.height,
                "surface dropped without dispose"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/surface.rs"]
mod tests;
