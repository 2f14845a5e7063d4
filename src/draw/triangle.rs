use crate::foundation::{
    color::Color,
    core::{Point, Rect, Vertex},
    error::PixtileResult,
    math::channel_from_f64,
};
use crate::surface::Surface;

/// Twice the signed area of `(a, b, p)`; positive when `p` is clockwise of `a -> b` in
/// screen coordinates.
fn edge(a: Point, b: Point, p: Point) -> i64 {
    i64::from(b.x - a.x) * i64::from(p.y - a.y) - i64::from(b.y - a.y) * i64::from(p.x - a.x)
}

fn bounding_box(points: [Point; 3]) -> Rect {
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Barycentric mix of the vertex colors with weights summing to `area`.
fn shade(v: &[Vertex; 3], w: [i64; 3], area: i64) -> Color {
    let mut out = [0u8; 4];
    let colors = v.map(|v| v.color.to_array());
    for (ch, o) in out.iter_mut().enumerate() {
        let sum: f64 = (0..3)
            .map(|i| w[i] as f64 * f64::from(colors[i][ch]))
            .sum();
        *o = channel_from_f64(sum / area as f64);
    }
    Color::from_array(out)
}

impl Surface {
    fn check_vertices(&self, op: &str, points: [Point; 3]) -> PixtileResult<()> {
        self.ensure_writable(op)?;
        for p in points {
            self.check_point(p.x, p.y)?;
        }
        Ok(())
    }

    /// Edge-function fill over the bounding box. `solid` paints one color; `None` shades
    /// from the vertex colors. Pixels on an edge count as inside; degenerate triangles
    /// paint nothing.
    pub(crate) fn raster_triangle(&mut self, v: [Vertex; 3], solid: Option<Color>) {
        let [a, b, c] = v.map(|v| v.point);
        let area = edge(a, b, c);
        if area == 0 {
            return;
        }
        let sign = area.signum();
        let bbox = bounding_box([a, b, c]);

        for y in bbox.y..bbox.bottom() {
            for x in bbox.x..bbox.right() {
                let p = Point::new(x, y);
                let w = [edge(b, c, p), edge(c, a, p), edge(a, b, p)];
                if w.iter().any(|&e| e.signum() == -sign) {
                    continue;
                }
                let color = solid.unwrap_or_else(|| shade(&v, w, area));
                self.set_pixel_fast(x, y, color);
            }
        }
    }

    /// Triangle outline through three lines.
    pub fn draw_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Color,
    ) -> PixtileResult<()> {
        self.check_vertices("draw_triangle", [a, b, c])?;
        self.plot_line(a, b, color);
        self.plot_line(b, c, color);
        self.plot_line(c, a, color);
        self.signal_refresh();
        Ok(())
    }

    /// Solid fill. Either winding order is accepted.
    pub fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Color,
    ) -> PixtileResult<()> {
        self.check_vertices("fill_triangle", [a, b, c])?;
        let v = [a, b, c].map(|p| Vertex { point: p, color });
        self.raster_triangle(v, Some(color));
        self.signal_refresh();
        Ok(())
    }

    /// Barycentric gradient fill between the three vertex colors.
    pub fn fill_gradient_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> PixtileResult<()> {
        self.check_vertices("fill_gradient_triangle", [a.point, b.point, c.point])?;
        self.raster_triangle([a, b, c], None);
        self.signal_refresh();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/triangle.rs"]
mod tests;
