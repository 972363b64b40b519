use super::ray::Ray;
use super::vec2::Vec2;

/// Slack applied to segment bounds, relative to the edge's largest
/// coordinate, so points computed on its own line are not rejected through
/// rounding.
const BOUNDS_EPSILON: f64 = 1e-9;

/// A directed line segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// The infinite line carrying this edge.
    pub fn ray(&self) -> Ray {
        Ray::through(self.start, self.end)
    }

    /// Axis-aligned bounding-box containment test against the endpoints.
    ///
    /// For diagonal edges this accepts points inside the box but off the
    /// segment; callers only pass points already known to lie on the line.
    pub fn is_point_in_segment_bounds(&self, point: Vec2) -> bool {
        let slack = BOUNDS_EPSILON * self.magnitude_scale();
        let min_x = self.start.x.min(self.end.x) - slack;
        let max_x = self.start.x.max(self.end.x) + slack;
        let min_y = self.start.y.min(self.end.y) - slack;
        let max_y = self.start.y.max(self.end.y) + slack;
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }

    // Never below 1 so edges near the origin keep an absolute slack.
    fn magnitude_scale(&self) -> f64 {
        [self.start.x, self.start.y, self.end.x, self.end.y]
            .iter()
            .fold(1.0_f64, |scale, c| scale.max(c.abs()))
    }
}
