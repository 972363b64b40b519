pub mod events;
pub mod physics_world;
mod resolution;

pub use events::{CollisionEvent, TickReport};
pub use physics_world::PhysicsWorld;
