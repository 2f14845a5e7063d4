//! Whole-surface and region transforms: resize, flips, row shift, color filters.

pub mod filter;
pub mod flip;
pub mod resize;
pub mod shift;

pub use filter::BlurEdge;
