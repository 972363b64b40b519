use crate::error::{PhysicsError, Result};
use crate::math::{Circle, Transform, Vec2};

/// Circular collision bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallBound {
    pub radius: f64,
    /// Centre relative to the owning part.
    pub offset: Vec2,
}

impl BallBound {
    pub fn new(radius: f64, offset: Vec2) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "ball radius must be finite and positive, got {}",
                radius
            )));
        }
        if !offset.is_finite() {
            return Err(PhysicsError::InvalidArgument(format!(
                "ball offset must be finite, got {:?}",
                offset
            )));
        }
        Ok(Self { radius, offset })
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    pub fn bounding_radius(&self) -> f64 {
        self.radius
    }

    pub fn world_center(&self, part: Transform) -> Vec2 {
        part.apply(self.offset)
    }

    /// The ball as an implicit circle in world space.
    pub fn circle(&self, part: Transform) -> Circle {
        Circle::new(self.world_center(part), self.radius)
    }
}
