use crate::math::Vec2;
use crate::objects::{EntityId, PartId};

/// Identifies one bound: the owning part and its index in the part's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundRef {
    pub part: PartId,
    pub index: usize,
}

/// One detected contact between two entities, seen from `entity`.
///
/// Built during detection and consumed once by resolution. Motions are
/// snapshots taken at detection time.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionCase {
    pub entity: EntityId,
    pub target: EntityId,
    pub bound: BoundRef,
    pub target_bound: BoundRef,
    /// Every intersection point between the two bounds.
    pub points: Vec<Vec2>,
    /// Average of `points`.
    pub contact_point: Vec2,
    /// Unit vector from `entity` towards `target`.
    pub normal: Vec2,
    pub inverse_normal: Vec2,
    pub motion: Vec2,
    pub target_motion: Vec2,
    /// Spin-induced velocity of each entity at `contact_point`.
    pub rotational_motion: Vec2,
    pub target_rotational_motion: Vec2,
}

impl CollisionCase {
    /// The same contact seen from the target.
    pub fn inverse(&self) -> CollisionCase {
        CollisionCase {
            entity: self.target,
            target: self.entity,
            bound: self.target_bound,
            target_bound: self.bound,
            points: self.points.clone(),
            contact_point: self.contact_point,
            normal: self.inverse_normal,
            inverse_normal: self.normal,
            motion: self.target_motion,
            target_motion: self.motion,
            rotational_motion: self.target_rotational_motion,
            target_rotational_motion: self.rotational_motion,
        }
    }

    /// Full velocity of `entity` at the contact point.
    pub fn motion_at_contact(&self) -> Vec2 {
        self.motion + self.rotational_motion
    }

    pub fn target_motion_at_contact(&self) -> Vec2 {
        self.target_motion + self.target_rotational_motion
    }
}

/// Mean of a non-empty point set; the origin for an empty one.
pub fn average_point(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    for p in points {
        sum += *p;
    }
    sum / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_case() -> CollisionCase {
        CollisionCase {
            entity: EntityId(1),
            target: EntityId(2),
            bound: BoundRef { part: PartId(0), index: 0 },
            target_bound: BoundRef { part: PartId(3), index: 1 },
            points: vec![Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0)],
            contact_point: Vec2::ZERO,
            normal: Vec2::new(1.0, 0.0),
            inverse_normal: Vec2::new(-1.0, 0.0),
            motion: Vec2::new(5.0, 0.0),
            target_motion: Vec2::new(-5.0, 0.0),
            rotational_motion: Vec2::new(0.0, 1.0),
            target_rotational_motion: Vec2::ZERO,
        }
    }

    #[test]
    fn test_inverse_swaps_sides() {
        let case = sample_case();
        let inv = case.inverse();
        assert_eq!(inv.entity, EntityId(2));
        assert_eq!(inv.target, EntityId(1));
        assert_eq!(inv.bound.part, PartId(3));
        assert_eq!(inv.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(inv.motion_at_contact(), Vec2::new(-5.0, 0.0));
        assert_eq!(inv.target_motion_at_contact(), Vec2::new(5.0, 1.0));
        assert_eq!(inv.inverse(), case);
    }

    #[test]
    fn test_average_point() {
        assert_eq!(average_point(&sample_case().points), Vec2::ZERO);
        assert_eq!(average_point(&[Vec2::new(2.0, 4.0)]), Vec2::new(2.0, 4.0));
        assert_eq!(average_point(&[]), Vec2::ZERO);
    }
}
