use std::path::Path;

use anyhow::Context;

use crate::composite::blend::BlendMode;
use crate::foundation::{
    core::Size,
    error::{PixtileError, PixtileResult},
};

/// Largest tile edge used when no platform limit is configured.
pub const DEFAULT_TILE_EDGE: i32 = 8192;

/// Default ceiling on the pixel bytes of one surface (4 GiB).
pub const DEFAULT_MAX_SURFACE_BYTES: u64 = 1 << 32;

/// Construction options shared by every surface created from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceOpts {
    /// Maximum width/height of a single backing buffer. Larger surfaces are tiled.
    pub tile_size: Size,
    /// Default blend mode of the surface, used by [`crate::Surface::build_at`].
    pub blend_mode: BlendMode,
    /// Largest total RGBA8 byte count of one surface across all of its tiles.
    pub max_surface_bytes: u64,
}

impl Default for SurfaceOpts {
    fn default() -> Self {
        Self {
            tile_size: Size::new(DEFAULT_TILE_EDGE, DEFAULT_TILE_EDGE),
            blend_mode: BlendMode::Blend,
            max_surface_bytes: DEFAULT_MAX_SURFACE_BYTES,
        }
    }
}

impl SurfaceOpts {
    pub fn with_tile_size(mut self, width: i32, height: i32) -> Self {
        self.tile_size = Size::new(width, height);
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn with_max_surface_bytes(mut self, max_surface_bytes: u64) -> Self {
        self.max_surface_bytes = max_surface_bytes;
        self
    }

    /// Fails with [`PixtileError::Resource`] when a `size` surface would exceed
    /// `max_surface_bytes`.
    pub fn check_surface_size(&self, size: Size) -> PixtileResult<()> {
        let bytes = u64::try_from(size.area())
            .ok()
            .and_then(|area| area.checked_mul(4));
        match bytes {
            Some(bytes) if bytes <= self.max_surface_bytes => Ok(()),
            _ => Err(PixtileError::resource(format!(
                "{}x{} surface exceeds the {} byte limit",
                size.width, size.height, self.max_surface_bytes
            ))),
        }
    }

    pub fn validate(&self) -> PixtileResult<()> {
        if self.tile_size.is_empty() {
            return Err(PixtileError::misuse(format!(
                "tile size must be positive, got {}x{}",
                self.tile_size.width, self.tile_size.height
            )));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> PixtileResult<Self> {
        let opts: Self = serde_json::from_str(s).context("parse surface options json")?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PixtileResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read surface options from {}", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/opts.rs"]
mod tests;
