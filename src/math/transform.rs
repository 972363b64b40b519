use super::vec2::Vec2;

/// World placement of a part: position plus combined rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Maps a local point to world space (rotation, then translation).
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Maps a world point back into local space.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }

    /// Transform of a child attached at `offset` with its own `self_rotation`.
    ///
    /// The offset is rotated by this (parent) transform's combined rotation.
    pub fn child(self, offset: Vec2, self_rotation: f64) -> Transform {
        Transform {
            position: self.apply(offset),
            rotation: self.rotation + self_rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
