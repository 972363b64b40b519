//! Per-entity broad and narrow phase.

use std::collections::HashSet;

use crate::collision::case::{average_point, BoundRef, CollisionCase};
use crate::collision::narrow::{bounds_may_touch, intersect_bounds};
use crate::math::Vec2;
use crate::objects::{EntityId, PartId, PhysicalEntity};

/// Collision bookkeeping owned by each entity.
#[derive(Debug, Clone)]
pub struct EntityCollisionHandler {
    enabled: bool,
    /// Entities never tested against this one.
    ignored: HashSet<EntityId>,
    /// Entities that already produced a case with this one this tick.
    collided_with: HashSet<EntityId>,
}

impl EntityCollisionHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ignored: HashSet::new(),
            collided_with: HashSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn ignore(&mut self, other: EntityId) {
        self.ignored.insert(other);
    }

    pub fn unignore(&mut self, other: EntityId) {
        self.ignored.remove(&other);
    }

    pub fn is_ignoring(&self, other: EntityId) -> bool {
        self.ignored.contains(&other)
    }

    pub fn has_collided_with(&self, other: EntityId) -> bool {
        self.collided_with.contains(&other)
    }

    pub fn can_collide_with(&self, other: EntityId) -> bool {
        self.enabled && !self.ignored.contains(&other) && !self.collided_with.contains(&other)
    }

    pub fn mark_collided(&mut self, other: EntityId) {
        self.collided_with.insert(other);
    }

    /// Called once per tick before detection.
    pub fn clear_collided(&mut self) {
        self.collided_with.clear();
    }

    /// Tests `this` against `other` and returns the first contact found.
    ///
    /// Both sides must permit the pairing and their bounding circles must
    /// overlap. Parts without bounds or made of gas are skipped. Bound pairs
    /// are visited in attached-part order, then bound order.
    pub fn test_against_entity(
        this_id: EntityId,
        this: &PhysicalEntity,
        other_id: EntityId,
        other: &PhysicalEntity,
    ) -> Option<CollisionCase> {
        if this_id == other_id {
            return None;
        }
        if !this.collision().can_collide_with(other_id) || !other.collision().can_collide_with(this_id) {
            return None;
        }
        let reach = this.bounding_radius() + other.bounding_radius();
        if this.position().distance_squared(other.position()) > reach * reach {
            return None;
        }

        let other_parts: Vec<PartId> = other
            .attached_parts()
            .into_iter()
            .filter(|id| other.part(*id).map_or(false, |p| p.is_collidable()))
            .collect();

        for part_id in this.attached_parts() {
            let Some(part) = this.part(part_id) else { continue };
            if !part.is_collidable() {
                continue;
            }
            for (index, bound) in part.bounds().iter().enumerate() {
                for &other_part_id in &other_parts {
                    let Some(other_part) = other.part(other_part_id) else { continue };
                    for (other_index, other_bound) in other_part.bounds().iter().enumerate() {
                        if !bounds_may_touch(bound, part.transform(), other_bound, other_part.transform()) {
                            continue;
                        }
                        let points = intersect_bounds(bound, part.transform(), other_bound, other_part.transform());
                        if points.is_empty() {
                            continue;
                        }
                        let case = build_case(
                            this_id,
                            this,
                            BoundRef { part: part_id, index },
                            other_id,
                            other,
                            BoundRef { part: other_part_id, index: other_index },
                            points,
                        );
                        log::debug!(
                            "contact {:?}/{:?} <-> {:?}/{:?} at {:?}",
                            this_id,
                            part_id,
                            other_id,
                            other_part_id,
                            case.contact_point
                        );
                        return Some(case);
                    }
                }
            }
        }
        None
    }
}

impl Default for EntityCollisionHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn build_case(
    this_id: EntityId,
    this: &PhysicalEntity,
    bound: BoundRef,
    other_id: EntityId,
    other: &PhysicalEntity,
    target_bound: BoundRef,
    points: Vec<Vec2>,
) -> CollisionCase {
    let contact_point = average_point(&points);
    let normal = (other.position() - this.position()).normalize_or(Vec2::DOWN);
    CollisionCase {
        entity: this_id,
        target: other_id,
        bound,
        target_bound,
        points,
        contact_point,
        normal,
        inverse_normal: -normal,
        motion: this.motion(),
        target_motion: other.motion(),
        rotational_motion: this.angular_motion_at(contact_point),
        target_rotational_motion: other.angular_motion_at(contact_point),
    }
}
