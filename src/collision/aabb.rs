// Axis-aligned boxes used for grid bucketing.

use crate::math::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB, ordering the corners.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Square box enclosing a circle.
    pub fn around(center: Vec2, radius: f64) -> Self {
        let r = radius.abs();
        AABB::new(center - Vec2::new(r, r), center + Vec2::new(r, r))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Overlap test; touching boxes count as overlapping.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Pulls both corners inside `limits`. A box lying entirely outside
    /// collapses onto the nearest border.
    pub fn clamped_to(&self, limits: &AABB) -> AABB {
        let clamp = |p: Vec2| {
            Vec2::new(
                p.x.max(limits.min.x).min(limits.max.x),
                p.y.max(limits.min.y).min(limits.max.y),
            )
        };
        AABB {
            min: clamp(self.min),
            max: clamp(self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let b = AABB::new(Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0));
        assert_eq!(b.min, Vec2::new(-2.0, -1.0));
        assert_eq!(b.max, Vec2::new(3.0, 4.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn test_around_circle() {
        let b = AABB::around(Vec2::new(10.0, 5.0), 2.0);
        assert_eq!(b.min, Vec2::new(8.0, 3.0));
        assert_eq!(b.max, Vec2::new(12.0, 7.0));
        assert!(b.contains(Vec2::new(12.0, 3.0)));
        assert!(!b.contains(Vec2::new(12.1, 3.0)));
    }

    #[test]
    fn test_overlaps() {
        let a = AABB::around(Vec2::ZERO, 1.0);
        assert!(a.overlaps(&AABB::around(Vec2::new(1.5, 0.0), 1.0)));
        assert!(a.overlaps(&AABB::around(Vec2::new(2.0, 0.0), 1.0)));
        assert!(!a.overlaps(&AABB::around(Vec2::new(2.5, 0.0), 1.0)));
        assert!(!a.overlaps(&AABB::around(Vec2::new(0.0, -3.0), 1.0)));
    }

    #[test]
    fn test_clamped_to() {
        let limits = AABB::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        let inside = AABB::around(Vec2::ZERO, 2.0);
        assert_eq!(inside.clamped_to(&limits), inside);

        let partial = AABB::new(Vec2::new(8.0, 8.0), Vec2::new(12.0, 12.0));
        assert_eq!(partial.clamped_to(&limits).max, Vec2::new(10.0, 10.0));

        let outside = AABB::around(Vec2::new(50.0, 0.0), 1.0);
        let c = outside.clamped_to(&limits);
        assert_eq!(c.min.x, 10.0);
        assert_eq!(c.max.x, 10.0);
    }
}
