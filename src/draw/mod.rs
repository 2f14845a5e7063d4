//! Integer pixel rasterizers: lines, circles and quadrants, rectangles, triangles, masks.
//!
//! Every public entry point validates its whole extent up front, writes through the
//! unchecked pixel path, and signals the renderer once. Tiled surfaces need no special
//! casing here beyond the region fills in [`rect`].

pub mod circle;
pub mod line;
pub mod mask;
pub mod rect;
pub mod triangle;

pub use circle::Quadrant;
pub use rect::{GradientCorners, GradientDirection};
