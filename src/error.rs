//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::objects::{EntityId, PartId};

/// Errors surfaced by construction and part-tree mutation.
///
/// Numerical degeneracies are never reported here; they are sanitized where
/// they occur.
#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown part {0:?}")]
    UnknownPart(PartId),

    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),

    #[error("part {part:?} already has a parent")]
    PartAlreadyLinked { part: PartId },

    #[error("part {child:?} is not linked under {parent:?}")]
    PartNotLinked { parent: PartId, child: PartId },

    #[error("linking {child:?} under {parent:?} would create a cycle")]
    LinkCycle { parent: PartId, child: PartId },

    #[error("entity {0:?} cannot be paired with itself")]
    SelfCollision(EntityId),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
