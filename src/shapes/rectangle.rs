use crate::error::{PhysicsError, Result};
use crate::math::{Edge, Transform, Vec2};

/// Oriented rectangular collision bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleBound {
    /// Full width and height.
    pub size: Vec2,
    /// Centre relative to the owning part.
    pub offset: Vec2,
    /// Rotation relative to the owning part, in radians.
    pub rotation: f64,
}

impl RectangleBound {
    pub fn new(size: Vec2, offset: Vec2, rotation: f64) -> Result<Self> {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "rectangle size must be finite and positive, got {:?}",
                size
            )));
        }
        if !offset.is_finite() || !rotation.is_finite() {
            return Err(PhysicsError::InvalidArgument(format!(
                "rectangle placement must be finite, got offset {:?} rotation {}",
                offset, rotation
            )));
        }
        Ok(Self {
            size,
            offset,
            rotation,
        })
    }

    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Larger side length; always covers the half-diagonal.
    pub fn bounding_radius(&self) -> f64 {
        self.size.x.max(self.size.y)
    }

    pub fn world_center(&self, part: Transform) -> Vec2 {
        part.apply(self.offset)
    }

    /// Corners in world space, in winding order.
    ///
    /// Each corner is turned by the bound's own rotation, shifted by its
    /// offset, then placed by the part transform.
    pub fn vertices(&self, part: Transform) -> [Vec2; 4] {
        let half = self.size * 0.5;
        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| part.apply(corner.rotate(self.rotation) + self.offset))
    }

    /// The four sides, each running from one vertex to the next.
    pub fn edges(&self, part: Transform) -> [Edge; 4] {
        let v = self.vertices(part);
        [
            Edge::new(v[0], v[1]),
            Edge::new(v[1], v[2]),
            Edge::new(v[2], v[3]),
            Edge::new(v[3], v[0]),
        ]
    }
}
