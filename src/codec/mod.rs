//! Image codec boundary. Files decode to straight-alpha RGBA8 rows with no padding and
//! encode back to PNG; the engine never sees the container format.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::Size,
    error::{PixtileError, PixtileResult},
};
use crate::surface::{Surface, buffer::rgba8_len, opts::SurfaceOpts};

/// Decoded image in the engine's pixel layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decodes any format the `image` crate recognizes.
pub fn decode(bytes: &[u8]) -> PixtileResult<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PixtileError::resource(format!("decode image from memory: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

pub fn load(path: &Path) -> PixtileResult<DecodedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image file {}", path.display()))?;
    decode(&bytes)
}

fn check_layout(width: u32, height: u32, rgba: &[u8]) -> PixtileResult<()> {
    let size = Size::new(
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    );
    let expected = rgba8_len(size)?;
    if rgba.len() != expected {
        return Err(PixtileError::misuse(format!(
            "rgba8 buffer for {width}x{height} must be {expected} bytes, got {}",
            rgba.len()
        )));
    }
    Ok(())
}

pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> PixtileResult<Vec<u8>> {
    check_layout(width, height, rgba)?;
    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut out),
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PixtileError::resource(format!("encode png: {e}")))?;
    Ok(out)
}

pub fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> PixtileResult<()> {
    let encoded = encode_png(width, height, rgba)?;
    std::fs::write(path, encoded).with_context(|| format!("write png {}", path.display()))?;
    Ok(())
}

impl Surface {
    /// Builds a surface from encoded image bytes, tiling it when `opts` require.
    pub fn decode(bytes: &[u8], opts: &SurfaceOpts) -> PixtileResult<Self> {
        Self::from_decoded(decode(bytes)?, opts)
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, opts: &SurfaceOpts) -> PixtileResult<Self> {
        let surface = Self::from_decoded(load(path.as_ref())?, opts)?;
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            tiled = surface.is_tiled(),
            "image loaded"
        );
        Ok(surface)
    }

    fn from_decoded(img: DecodedImage, opts: &SurfaceOpts) -> PixtileResult<Self> {
        let (Ok(width), Ok(height)) = (i32::try_from(img.width), i32::try_from(img.height)) else {
            return Err(PixtileError::resource(format!(
                "image {}x{} exceeds the addressable surface size",
                img.width, img.height
            )));
        };
        Self::from_rgba8(width, height, img.rgba, opts)
    }

    /// Encodes the whole surface, tiles gathered, as PNG.
    pub fn encode_png(&self) -> PixtileResult<Vec<u8>> {
        let rgba = self.to_rgba8()?;
        encode_png(self.width() as u32, self.height() as u32, &rgba)
    }

    #[tracing::instrument(skip_all, fields(id = %self.id(), path = %path.as_ref().display()))]
    pub fn save_png(&self, path: impl AsRef<Path>) -> PixtileResult<()> {
        let rgba = self.to_rgba8()?;
        save_png(path.as_ref(), self.width() as u32, self.height() as u32, &rgba)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
