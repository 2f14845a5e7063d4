use crate::foundation::error::PixtileResult;
use crate::surface::{Surface, SurfaceId};

/// Presentation backend that mirrors surfaces into displayable textures.
///
/// The engine never draws through this trait. It only marks the presentation dirty after
/// pixel writes and hands the pixels over on [`Surface::lock`].
pub trait Renderer {
    /// Marks the presentation dirty so it is redrawn on the next frame.
    fn refresh_signal(&self);

    /// Copies the surface's pixels into a backend texture. Tiled surfaces expose their tiles
    /// through [`Surface::tile_grid`], one texture per tile.
    fn mirror_to_texture(&self, surface: &Surface) -> PixtileResult<()>;

    /// Drops the texture mirrored for `surface`.
    fn release_texture(&self, surface: SurfaceId) {
        let _ = surface;
    }
}
