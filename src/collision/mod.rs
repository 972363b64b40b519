pub mod aabb;
pub mod case;
pub mod handler;
pub mod narrow;
pub mod spatial_grid;

// Re-export key types
pub use aabb::AABB;
pub use case::{BoundRef, CollisionCase};
pub use handler::EntityCollisionHandler;
pub use narrow::{bounds_may_touch, intersect_bound_refs, intersect_bounds};
pub use spatial_grid::SpatialGrid;
