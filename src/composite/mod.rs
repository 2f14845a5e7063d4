//! Rectangle-to-rectangle compositing ("build") and the per-pixel blend kernels.

pub mod blend;
pub mod build;
