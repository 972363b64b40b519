//! Infinite lines in slope/offset form.

use super::vec2::Vec2;

/// Run-to-rise ratio below which a line is treated as vertical.
const VERTICAL_EPSILON: f64 = 1e-12;

/// A line `y = slope * x + offset`.
///
/// Vertical lines have `slope == f64::INFINITY` and are located by `origin_x`
/// instead; `offset` is unused for them.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub slope: f64,
    pub offset: f64,
    pub origin_x: f64,
}

impl Ray {
    /// Point returned by [`Ray::intersect`] when two lines never meet.
    pub const NO_INTERSECTION: Vec2 = Vec2 {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };

    /// Line through two points.
    pub fn through(a: Vec2, b: Vec2) -> Self {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        if dx == 0.0 || dx.abs() <= VERTICAL_EPSILON * dy.abs() {
            Self::vertical(a.x)
        } else {
            let slope = dy / dx;
            Self {
                slope,
                offset: a.y - slope * a.x,
                origin_x: a.x,
            }
        }
    }

    /// Line `a x + b y + c = 0`, or `None` when `a` and `b` are both zero.
    pub fn from_implicit(a: f64, b: f64, c: f64) -> Option<Self> {
        if a == 0.0 && b == 0.0 {
            None
        } else if b == 0.0 || b.abs() <= VERTICAL_EPSILON * a.abs() {
            Some(Self::vertical(-c / a))
        } else {
            Some(Self {
                slope: -a / b,
                offset: -c / b,
                origin_x: 0.0,
            })
        }
    }

    /// Steeper than 45 degrees, so `x` is better solved from `y`.
    pub fn is_steep(&self) -> bool {
        self.slope.abs() > 1.0
    }

    /// Evaluates `x` at `y` as `x = y / slope - offset / slope`.
    /// Meaningless for horizontal lines.
    pub fn x_at(&self, y: f64) -> f64 {
        if self.is_vertical() {
            self.origin_x
        } else {
            y / self.slope - self.offset / self.slope
        }
    }

    /// Vertical line `x = origin_x`.
    pub fn vertical(origin_x: f64) -> Self {
        Self {
            slope: f64::INFINITY,
            offset: 0.0,
            origin_x,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    /// Evaluates `y` at `x`. Meaningless for vertical lines.
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.offset
    }

    /// Intersection point of two lines.
    ///
    /// Parallel lines yield [`Ray::NO_INTERSECTION`]; identical lines yield
    /// an arbitrary point on the shared line.
    pub fn intersect(a: &Ray, b: &Ray) -> Vec2 {
        match (a.is_vertical(), b.is_vertical()) {
            (true, true) => {
                if a.origin_x == b.origin_x {
                    Vec2::new(a.origin_x, 0.0)
                } else {
                    Self::NO_INTERSECTION
                }
            }
            (true, false) => Vec2::new(a.origin_x, b.y_at(a.origin_x)),
            (false, true) => Vec2::new(b.origin_x, a.y_at(b.origin_x)),
            (false, false) => {
                if a.slope == b.slope {
                    if a.offset == b.offset {
                        Vec2::new(0.0, a.offset)
                    } else {
                        Self::NO_INTERSECTION
                    }
                } else {
                    let x = (b.offset - a.offset) / (a.slope - b.slope);
                    // The shallower line loses the least evaluating y.
                    let shallow = if a.slope.abs() <= b.slope.abs() { a } else { b };
                    Vec2::new(x, shallow.y_at(x))
                }
            }
        }
    }
}

impl PartialEq for Ray {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => self.origin_x == other.origin_x,
            (false, false) => self.slope == other.slope && self.offset == other.offset,
            _ => false,
        }
    }
}
