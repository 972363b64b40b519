pub mod ball;
pub mod rectangle;

pub use ball::BallBound;
pub use rectangle::RectangleBound;

use crate::math::{Transform, Vec2};

/// Segments used to approximate a ball outline for debug drawing.
const BALL_OUTLINE_SEGMENTS: usize = 16;

/// Type tag of a collision bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Ball,
    Rectangle,
}

/// Geometric shape attached to a part. The set of shapes is closed; narrow
/// phase matches on every pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionBound {
    Ball(BallBound),
    Rectangle(RectangleBound),
}

impl CollisionBound {
    pub fn kind(&self) -> BoundKind {
        match self {
            CollisionBound::Ball(_) => BoundKind::Ball,
            CollisionBound::Rectangle(_) => BoundKind::Rectangle,
        }
    }

    pub fn offset(&self) -> Vec2 {
        match self {
            CollisionBound::Ball(ball) => ball.offset,
            CollisionBound::Rectangle(rect) => rect.offset,
        }
    }

    /// Rotation relative to the owning part. Balls are rotation-free.
    pub fn rotation(&self) -> f64 {
        match self {
            CollisionBound::Ball(_) => 0.0,
            CollisionBound::Rectangle(rect) => rect.rotation,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            CollisionBound::Ball(ball) => ball.area(),
            CollisionBound::Rectangle(rect) => rect.area(),
        }
    }

    pub fn bounding_radius(&self) -> f64 {
        match self {
            CollisionBound::Ball(ball) => ball.bounding_radius(),
            CollisionBound::Rectangle(rect) => rect.bounding_radius(),
        }
    }

    /// Centre of the bound in world space for the given part placement.
    pub fn final_world_position(&self, part: Transform) -> Vec2 {
        part.apply(self.offset())
    }

    /// World-space outline for debug rendering; balls are approximated by a
    /// regular polygon.
    pub fn debug_outline(&self, part: Transform) -> Vec<Vec2> {
        match self {
            CollisionBound::Ball(ball) => {
                let center = ball.world_center(part);
                (0..BALL_OUTLINE_SEGMENTS)
                    .map(|i| {
                        let angle = i as f64 * std::f64::consts::TAU / BALL_OUTLINE_SEGMENTS as f64;
                        center + Vec2::new(ball.radius, 0.0).rotate(angle)
                    })
                    .collect()
            }
            CollisionBound::Rectangle(rect) => rect.vertices(part).to_vec(),
        }
    }
}

impl From<BallBound> for CollisionBound {
    fn from(ball: BallBound) -> Self {
        CollisionBound::Ball(ball)
    }
}

impl From<RectangleBound> for CollisionBound {
    fn from(rect: RectangleBound) -> Self {
        CollisionBound::Rectangle(rect)
    }
}
