use crate::math::Vec2;
use crate::objects::{EntityId, PartId};

/// Notification queued by the resolution pass, one per resolved side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Both parts solid; `impulse` is the magnitude applied to `entity`.
    Hard {
        entity: EntityId,
        other: EntityId,
        part: PartId,
        other_part: PartId,
        contact_point: Vec2,
        impulse: f64,
    },
    /// At least one part liquid; relative motion was damped.
    Soft {
        entity: EntityId,
        other: EntityId,
        part: PartId,
        other_part: PartId,
    },
}

impl CollisionEvent {
    pub fn entity(&self) -> EntityId {
        match self {
            CollisionEvent::Hard { entity, .. } | CollisionEvent::Soft { entity, .. } => *entity,
        }
    }

    pub fn other(&self) -> EntityId {
        match self {
            CollisionEvent::Hard { other, .. } | CollisionEvent::Soft { other, .. } => *other,
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, CollisionEvent::Hard { .. })
    }
}

/// Counters for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pairs sharing at least one grid bucket.
    pub candidate_pairs: usize,
    /// Pairs whose bounds actually intersect.
    pub cases: usize,
    /// Hard responses applied, counting each side separately.
    pub hard_collisions: usize,
    pub soft_collisions: usize,
}
