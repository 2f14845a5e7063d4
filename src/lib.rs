//! pixtile is a 2D pixel-surface engine for RGBA8 bitmaps.
//!
//! A [`Surface`] is one logical pixel plane. Surfaces larger than the configured tile size
//! are split into a grid of bounded tiles so no single buffer exceeds a platform limit;
//! every operation behaves the same, pixel for pixel, on flat and tiled surfaces.
//!
//! # Layout
//!
//! - [`surface`]: storage, tiling resolver, pixel access, locking and disposal.
//! - [`composite`]: the rectangle-clipped, blend-aware [`Surface::build`].
//! - [`draw`]: lines, circles and quadrants, rectangles, triangles, gradients, masks.
//! - [`transform`]: resize, flips, row shift, hue rotation, blur and bloom.
//! - [`text`]: the [`Font`] boundary and text placement.
//! - [`codec`]: decode/encode through the `image` crate.
//!
//! Collaborators (renderer, font) are shared through `Rc`; the engine is single-threaded.
#![forbid(unsafe_code)]

mod foundation;

pub mod codec;
pub mod composite;
pub mod draw;
pub mod surface;
pub mod text;
pub mod transform;

pub use codec::DecodedImage;
pub use composite::blend::BlendMode;
pub use draw::{GradientCorners, GradientDirection, Quadrant};
pub use foundation::color::Color;
pub use foundation::core::{Point, Rect, Size, Vertex};
pub use foundation::error::{PixtileError, PixtileResult};
pub use surface::buffer::PixelBuffer;
pub use surface::opts::{DEFAULT_MAX_SURFACE_BYTES, DEFAULT_TILE_EDGE, SurfaceOpts};
pub use surface::registry::{RegistryStats, SurfaceRegistry};
pub use surface::renderer::Renderer;
pub use surface::tiling::{Tile, TileGrid, TilePart};
pub use surface::{Representation, Surface, SurfaceId};
pub use text::{Font, FontCache, TextAlign};
pub use transform::BlurEdge;
