use crate::foundation::math::{div_round_u32, mul_div255_u8};

/// Straight-alpha RGBA8 pixel in memory order.
pub type Rgba8 = [u8; 4];

/// Per-pixel combination rule used by [`crate::Surface::build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source replaces destination.
    None,
    /// Source-over alpha compositing.
    #[default]
    Blend,
    /// Channel-wise saturating add.
    Addition,
    /// Channel-wise multiply.
    Mod,
}

pub fn blend_pixel(dst: Rgba8, src: Rgba8, mode: BlendMode) -> Rgba8 {
    match mode {
        BlendMode::None => src,
        BlendMode::Blend => over(dst, src),
        BlendMode::Addition => add(dst, src),
        BlendMode::Mod => modulate(dst, src),
    }
}

/// Source-over for straight (non-premultiplied) alpha.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u32::from(src[i]) * sa * 255;
        let dc = u32::from(dst[i]) * da * inv;
        out[i] = div_round_u32(sc + dc, out_a).min(255) as u8;
    }
    out[3] = div_round_u32(out_a, 255).min(255) as u8;
    out
}

pub fn add(dst: Rgba8, src: Rgba8) -> Rgba8 {
    [
        dst[0].saturating_add(src[0]),
        dst[1].saturating_add(src[1]),
        dst[2].saturating_add(src[2]),
        dst[3].saturating_add(src[3]),
    ]
}

pub fn modulate(dst: Rgba8, src: Rgba8) -> Rgba8 {
    [
        mul_div255_u8(dst[0], src[0]),
        mul_div255_u8(dst[1], src[1]),
        mul_div255_u8(dst[2], src[2]),
        mul_div255_u8(dst[3], src[3]),
    ]
}

/// Blends `src` into every pixel of an RGBA8 row in place.
pub fn blend_row_in_place(dst: &mut [u8], src: &[u8], mode: BlendMode) {
    debug_assert_eq!(dst.len(), src.len());
    if mode == BlendMode::None {
        dst.copy_from_slice(src);
        return;
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = blend_pixel([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], mode);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
