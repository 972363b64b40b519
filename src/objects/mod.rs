pub mod entity;
pub mod part;

pub use entity::{EntityId, PhysicalEntity};
pub use part::{Part, PartId, PartLink};
