//! Physical material properties of a part.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Phase of a material. Only solids take part in push-out and impulse
/// exchange; gases never collide at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatterState {
    Solid,
    Liquid,
    Gas,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub state: MatterState,
    /// Mass per unit of bound area.
    pub density: f64,
    /// Impulse a part absorbs per unit of damage.
    pub strength: f64,
    /// Restitution in `[0, 1]`. 0 = perfectly inelastic, 1 = perfectly elastic.
    pub bounciness: f64,
    /// Share of tangential contact velocity removed by a hard collision, `[0, 1]`.
    ///
    /// The averaged friction `f` of both parts scales tangent speed by
    /// `1 - f`: 0 keeps it all, 1 stops sliding dead.
    pub friction: f64,
}

impl Material {
    /// Creates a material, rejecting negative or non-finite density and strength.
    pub fn new(
        state: MatterState,
        density: f64,
        strength: f64,
        bounciness: f64,
        friction: f64,
    ) -> Result<Self> {
        if !density.is_finite() || density < 0.0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "material density must be finite and non-negative, got {}",
                density
            )));
        }
        if !strength.is_finite() || strength < 0.0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "material strength must be finite and non-negative, got {}",
                strength
            )));
        }
        Ok(Material {
            state,
            density,
            strength,
            // Clamp values to reasonable ranges
            bounciness: bounciness.clamp(0.0, 1.0),
            friction: friction.clamp(0.0, 1.0),
        })
    }

    pub fn metal() -> Self {
        Material {
            state: MatterState::Solid,
            density: 7.8,
            strength: 400.0,
            bounciness: 0.3,
            friction: 0.4,
        }
    }

    pub fn water() -> Self {
        Material {
            state: MatterState::Liquid,
            density: 1.0,
            strength: 1.0,
            bounciness: 0.0,
            friction: 0.1,
        }
    }

    pub fn vapour() -> Self {
        Material {
            state: MatterState::Gas,
            density: 0.01,
            strength: 0.0,
            bounciness: 0.0,
            friction: 0.0,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.state == MatterState::Solid
    }
}

impl Default for Material {
    /// Moderately bouncy solid of unit density.
    fn default() -> Self {
        Material {
            state: MatterState::Solid,
            density: 1.0,
            strength: 100.0,
            bounciness: 0.2,
            friction: 0.5,
        }
    }
}
