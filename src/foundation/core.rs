use crate::foundation::color::Color;

/// Integer pixel coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation between `a` (t = 0) and `b` (t = 1), rounded to the nearest pixel.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let x = f64::from(a.x) + f64::from(b.x - a.x) * t;
        let y = f64::from(a.y) + f64::from(b.y - a.y) * t;
        Self::new(x.round() as i32, y.round() as i32)
    }

    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

/// Axis-aligned integer rectangle. `x + width` and `y + height` are exclusive edges.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge. Saturates at `i32::MAX`; predicates use the exact 64-bit
    /// edges instead.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    fn right_i64(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    fn bottom_i64(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn same_size(self, other: Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn contains_point(self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < self.right_i64()
            && i64::from(y) < self.bottom_i64()
    }

    /// True when `other` lies fully inside `self`. Empty rectangles are never contained.
    pub fn contains_rect(self, other: Self) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right_i64() <= self.right_i64()
            && other.bottom_i64() <= self.bottom_i64()
    }

    pub fn overlaps(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && i64::from(self.x) < other.right_i64()
            && i64::from(other.x) < self.right_i64()
            && i64::from(self.y) < other.bottom_i64()
            && i64::from(other.y) < self.bottom_i64()
    }

    pub fn intersect(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right_i64().min(other.right_i64());
        let b = self.bottom_i64().min(other.bottom_i64());
        // Both extents are bounded by the narrower input, so they fit in i32.
        let width = i32::try_from(r - i64::from(x)).ok()?;
        let height = i32::try_from(b - i64::from(y)).ok()?;
        Some(Self::new(x, y, width, height))
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// [`Rect::translate`] that reports overflow of the new origin as `None`.
    pub fn checked_translate(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.width,
            self.height,
        ))
    }
}

/// A point with a color, consumed by triangle rasterization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub point: Point,
    pub color: Color,
}

impl Vertex {
    pub fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            point: Point::new(x, y),
            color,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
