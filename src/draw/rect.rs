use crate::foundation::{
    color::Color,
    core::{Rect, Vertex},
    error::PixtileResult,
    math::channel_from_f64,
};
use crate::surface::Surface;

/// Corner colors of a bilinear rectangle gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GradientCorners {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_left: Color,
    pub bottom_right: Color,
}

impl GradientCorners {
    pub fn new(top_left: Color, top_right: Color, bottom_left: Color, bottom_right: Color) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Bilinear mix at normalized `(fx, fy)`, both in `[0, 1]`.
    fn sample(&self, fx: f64, fy: f64) -> Color {
        let w = [
            (1.0 - fx) * (1.0 - fy),
            fx * (1.0 - fy),
            (1.0 - fx) * fy,
            fx * fy,
        ];
        let c = [
            self.top_left.to_array(),
            self.top_right.to_array(),
            self.bottom_left.to_array(),
            self.bottom_right.to_array(),
        ];
        let mut out = [0u8; 4];
        for (ch, o) in out.iter_mut().enumerate() {
            let v: f64 = (0..4).map(|i| w[i] * f64::from(c[i][ch])).sum();
            *o = channel_from_f64(v);
        }
        Color::from_array(out)
    }
}

/// Axis of a two-color rectangle gradient. The first color sits at the left, top, or
/// top-left corner respectively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

/// Position of `v` within `len` pixels, normalized so the first and last pixel hit 0 and 1.
fn normalized(v: i32, len: i32) -> f64 {
    if len <= 1 {
        0.0
    } else {
        f64::from(v) / f64::from(len - 1)
    }
}

impl Surface {
    /// Fills an in-bounds rectangle with one color, tile by tile when tiled.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> PixtileResult<()> {
        self.ensure_writable("fill_rect")?;
        self.check_rect(rect)?;
        self.fill_region(rect, color);
        self.signal_refresh();
        Ok(())
    }

    /// 1-pixel border along the inside edge of `rect`.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) -> PixtileResult<()> {
        self.ensure_writable("draw_rect")?;
        self.check_rect(rect)?;
        let (r, b) = (rect.right() - 1, rect.bottom() - 1);
        self.fill_region(Rect::new(rect.x, rect.y, rect.width, 1), color);
        self.fill_region(Rect::new(rect.x, b, rect.width, 1), color);
        self.fill_region(Rect::new(rect.x, rect.y, 1, rect.height), color);
        self.fill_region(Rect::new(r, rect.y, 1, rect.height), color);
        self.signal_refresh();
        Ok(())
    }

    /// Four-corner bilinear gradient fill.
    pub fn fill_gradient_rect(
        &mut self,
        rect: Rect,
        corners: GradientCorners,
    ) -> PixtileResult<()> {
        self.ensure_writable("fill_gradient_rect")?;
        self.check_rect(rect)?;
        for y in 0..rect.height {
            let fy = normalized(y, rect.height);
            for x in 0..rect.width {
                let c = corners.sample(normalized(x, rect.width), fy);
                self.set_pixel_fast(rect.x + x, rect.y + y, c);
            }
        }
        self.signal_refresh();
        Ok(())
    }

    /// Two-color gradient fill along `direction`.
    ///
    /// Horizontal and vertical reuse the bilinear fill with duplicated corners. Diagonal
    /// splits the rectangle along its anti-diagonal into two gradient triangles that meet
    /// at the midpoint color.
    pub fn fill_gradient_rect_two(
        &mut self,
        rect: Rect,
        c1: Color,
        c2: Color,
        direction: GradientDirection,
    ) -> PixtileResult<()> {
        match direction {
            GradientDirection::Horizontal => {
                self.fill_gradient_rect(rect, GradientCorners::new(c1, c2, c1, c2))
            }
            GradientDirection::Vertical => {
                self.fill_gradient_rect(rect, GradientCorners::new(c1, c1, c2, c2))
            }
            GradientDirection::Diagonal => {
                let mid = Color::interpolate(c1, c2, 0.5);
                if rect.width == 1 || rect.height == 1 {
                    return self.fill_gradient_rect(rect, GradientCorners::new(c1, mid, mid, c2));
                }
                self.ensure_writable("fill_gradient_rect_two")?;
                self.check_rect(rect)?;
                let (l, t) = (rect.x, rect.y);
                let (r, b) = (rect.right() - 1, rect.bottom() - 1);
                let tl = Vertex::new(l, t, c1);
                let tr = Vertex::new(r, t, mid);
                let bl = Vertex::new(l, b, mid);
                let br = Vertex::new(r, b, c2);
                self.raster_triangle([tl, tr, bl], None);
                self.raster_triangle([tr, br, bl], None);
                self.signal_refresh();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/rect.rs"]
mod tests;
