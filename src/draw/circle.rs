use crate::foundation::{
    color::Color,
    core::{Point, Rect},
    error::{PixtileError, PixtileResult},
};
use crate::surface::Surface;

/// One quarter of a circle, named by the screen corner it bulges towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Horizontal and vertical sign of the quadrant in screen coordinates.
    fn signs(self) -> (i32, i32) {
        match self {
            Quadrant::TopRight => (1, -1),
            Quadrant::TopLeft => (-1, -1),
            Quadrant::BottomLeft => (-1, 1),
            Quadrant::BottomRight => (1, 1),
        }
    }

    /// Pixels covered by the quadrant of a circle of `radius` around `center`, or `None`
    /// when an edge leaves the i32 range.
    fn extent(self, center: Point, radius: i32) -> Option<Rect> {
        let (sx, sy) = self.signs();
        let near = |c: i32| c.checked_sub(radius - 1);
        let x = if sx > 0 { center.x } else { near(center.x)? };
        let y = if sy > 0 { center.y } else { near(center.y)? };
        Some(Rect::new(x, y, radius, radius))
    }
}

/// Midpoint circle traversal of the first octant, yielding `(x, y)` offsets.
///
/// Starts at `(r - 1, 0)` and stops once `x < y`; the other octants follow by symmetry.
#[derive(Clone, Debug)]
pub(crate) struct Midpoint {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    err: i32,
    diameter: i32,
}

impl Midpoint {
    /// `radius` is positive; callers check its extent before iterating.
    pub(crate) fn new(radius: i32) -> Self {
        let diameter = radius.saturating_mul(2);
        Self {
            x: radius - 1,
            y: 0,
            dx: 1,
            dy: 1,
            err: 1 - diameter,
            diameter,
        }
    }
}

impl Iterator for Midpoint {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x < self.y {
            return None;
        }
        let step = (self.x, self.y);
        if self.err <= 0 {
            self.y += 1;
            self.err += self.dy;
            self.dy += 2;
        }
        if self.err > 0 {
            self.x -= 1;
            self.dx += 2;
            self.err += self.dx - self.diameter;
        }
        Some(step)
    }
}

fn check_radius(radius: i32) -> PixtileResult<()> {
    if radius <= 0 {
        return Err(PixtileError::misuse(format!(
            "circle radius must be positive, got {radius}"
        )));
    }
    Ok(())
}

/// Pixels covered by a circle of `radius` around `center`, or `None` when an edge
/// leaves the i32 range.
fn circle_extent(center: Point, radius: i32) -> Option<Rect> {
    let side = radius.checked_mul(2)? - 1;
    Some(Rect::new(
        center.x.checked_sub(radius - 1)?,
        center.y.checked_sub(radius - 1)?,
        side,
        side,
    ))
}

/// Color at `p` for a radial gradient from `inner` at the center to `outer` at the rim.
fn radial(center: Point, radius: i32, p: Point, inner: Color, outer: Color) -> Color {
    let f = 1.0 - p.distance(center) / f64::from(radius);
    Color::interpolate(inner, outer, f)
}

impl Surface {
    /// Validates a circle or quadrant draw; radius overflow reports as out of bounds.
    fn begin_circle(
        &self,
        op: &str,
        center: Point,
        radius: i32,
        quadrant: Option<Quadrant>,
    ) -> PixtileResult<()> {
        self.ensure_writable(op)?;
        check_radius(radius)?;
        let extent = match quadrant {
            Some(q) => q.extent(center, radius),
            None => circle_extent(center, radius),
        };
        match extent {
            Some(rect) => self.check_rect(rect),
            None => Err(PixtileError::out_of_bounds(format!(
                "{op}: radius {radius} around ({},{}) exceeds the coordinate range",
                center.x, center.y
            ))),
        }
    }

    /// Horizontal run `[x0, x1]` on row `y`.
    fn span(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        self.fill_region(Rect::new(lo, y, hi - lo + 1, 1), color);
    }

    fn gradient_span(&mut self, x0: i32, x1: i32, y: i32, shade: &dyn Fn(Point) -> Color) {
        for x in x0.min(x1)..=x0.max(x1) {
            let c = shade(Point::new(x, y));
            self.set_pixel_fast(x, y, c);
        }
    }

    /// Circle outline through eight-way symmetric plotting.
    pub fn draw_circle(&mut self, center: Point, radius: i32, color: Color) -> PixtileResult<()> {
        self.begin_circle("draw_circle", center, radius, None)?;
        let (cx, cy) = (center.x, center.y);
        for (x, y) in Midpoint::new(radius) {
            for (px, py) in [
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                self.set_pixel_fast(px, py, color);
            }
        }
        self.signal_refresh();
        Ok(())
    }

    pub fn fill_circle(&mut self, center: Point, radius: i32, color: Color) -> PixtileResult<()> {
        self.begin_circle("fill_circle", center, radius, None)?;
        let (cx, cy) = (center.x, center.y);
        for (x, y) in Midpoint::new(radius) {
            self.span(cx - x, cx + x, cy + y, color);
            self.span(cx - x, cx + x, cy - y, color);
            self.span(cx - y, cx + y, cy + x, color);
            self.span(cx - y, cx + y, cy - x, color);
        }
        self.signal_refresh();
        Ok(())
    }

    /// Filled circle shaded from `inner` at the center to `outer` at the rim.
    pub fn fill_gradient_circle(
        &mut self,
        center: Point,
        radius: i32,
        inner: Color,
        outer: Color,
    ) -> PixtileResult<()> {
        self.begin_circle("fill_gradient_circle", center, radius, None)?;
        let shade = |p: Point| radial(center, radius, p, inner, outer);
        let (cx, cy) = (center.x, center.y);
        for (x, y) in Midpoint::new(radius) {
            self.gradient_span(cx - x, cx + x, cy + y, &shade);
            self.gradient_span(cx - x, cx + x, cy - y, &shade);
            self.gradient_span(cx - y, cx + y, cy + x, &shade);
            self.gradient_span(cx - y, cx + y, cy - x, &shade);
        }
        self.signal_refresh();
        Ok(())
    }

    /// Arc of one quadrant; the two octants of that quadrant are plotted per step.
    pub fn draw_quadrant(
        &mut self,
        center: Point,
        radius: i32,
        quadrant: Quadrant,
        color: Color,
    ) -> PixtileResult<()> {
        self.begin_circle("draw_quadrant", center, radius, Some(quadrant))?;
        let (sx, sy) = quadrant.signs();
        for (x, y) in Midpoint::new(radius) {
            self.set_pixel_fast(center.x + sx * x, center.y + sy * y, color);
            self.set_pixel_fast(center.x + sx * y, center.y + sy * x, color);
        }
        self.signal_refresh();
        Ok(())
    }

    pub fn fill_quadrant(
        &mut self,
        center: Point,
        radius: i32,
        quadrant: Quadrant,
        color: Color,
    ) -> PixtileResult<()> {
        self.begin_circle("fill_quadrant", center, radius, Some(quadrant))?;
        let (sx, sy) = quadrant.signs();
        for (x, y) in Midpoint::new(radius) {
            self.span(center.x, center.x + sx * x, center.y + sy * y, color);
            self.span(center.x, center.x + sx * y, center.y + sy * x, color);
        }
        self.signal_refresh();
        Ok(())
    }

    /// Filled quadrant shaded radially like [`Surface::fill_gradient_circle`].
    pub fn fill_gradient_quadrant(
        &mut self,
        center: Point,
        radius: i32,
        quadrant: Quadrant,
        inner: Color,
        outer: Color,
    ) -> PixtileResult<()> {
        self.begin_circle("fill_gradient_quadrant", center, radius, Some(quadrant))?;
        let shade = |p: Point| radial(center, radius, p, inner, outer);
        let (sx, sy) = quadrant.signs();
        for (x, y) in Midpoint::new(radius) {
            self.gradient_span(center.x, center.x + sx * x, center.y + sy * y, &shade);
            self.gradient_span(center.x, center.x + sx * y, center.y + sy * x, &shade);
        }
        self.signal_refresh();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/circle.rs"]
mod tests;
