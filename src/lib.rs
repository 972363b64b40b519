//! Collision detection and response for composite 2D rigid bodies.
//!
//! Entities are trees of parts carrying ball and rectangle bounds. A
//! [`PhysicsWorld`] integrates their motion, buckets them in a spatial grid,
//! intersects their bounds exactly and resolves every contact with push-out
//! followed by an impulse or soft damping.

pub mod collision;
pub mod common;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionCase, EntityCollisionHandler};
pub use common::{Material, MatterState};
pub use config::{CentralGravity, WorldConfig};
pub use error::{PhysicsError, Result};
pub use math::{Transform, Vec2};
pub use objects::{EntityId, Part, PartId, PhysicalEntity};
pub use shapes::{BallBound, CollisionBound, RectangleBound};
pub use world::{CollisionEvent, PhysicsWorld, TickReport};
