//! World tuning parameters.
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it changes.

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// A body every entity falls towards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralGravity {
    pub center: Vec2,
    /// Force per unit mass at distance 1.
    pub strength: f64,
}

/// Configuration for a [`PhysicsWorld`](crate::world::PhysicsWorld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // ========================================================================
    // Broad phase
    // ========================================================================
    /// Bucket columns.
    pub grid_columns: usize,

    /// Bucket rows.
    pub grid_rows: usize,

    /// Bucket edge is `2^cell_size_log2` world units.
    pub cell_size_log2: u32,

    // ========================================================================
    // Push-out
    // ========================================================================
    /// Distance of each outward step (world units).
    pub push_out_step: f64,

    /// Outward steps tried before giving up.
    pub push_out_max_steps: u32,

    /// Halving steps back towards the heavier body.
    pub push_out_refinements: u32,

    // ========================================================================
    // Response
    // ========================================================================
    /// Fraction of relative velocity left after one second of soft contact.
    pub soft_collision_retention: f64,

    // ========================================================================
    // Limits
    // ========================================================================
    /// Linear speed cap (units/second).
    pub max_speed: f64,

    /// Angular speed cap (radians/second).
    pub max_angular_speed: f64,

    /// Largest coordinate magnitude an entity may reach.
    pub position_limit: f64,

    pub central_gravity: Option<CentralGravity>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_columns: 64,
            grid_rows: 64,
            cell_size_log2: 7,

            push_out_step: 1.0,
            push_out_max_steps: 1000,
            push_out_refinements: 10,

            soft_collision_retention: 0.1,

            max_speed: 100_000.0,
            max_angular_speed: 100.0,
            position_limit: 10_000_000.0,

            central_gravity: None,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_central_gravity(mut self, center: Vec2, strength: f64) -> Self {
        self.central_gravity = Some(CentralGravity { center, strength });
        self
    }

    /// Checks value ranges. Grid dimensions are checked when the grid is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.push_out_step.is_finite() && self.push_out_step > 0.0) {
            return Err(invalid("push_out_step must be positive", self.push_out_step));
        }
        if !(0.0..=1.0).contains(&self.soft_collision_retention) {
            return Err(invalid(
                "soft_collision_retention must lie in [0, 1]",
                self.soft_collision_retention,
            ));
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("max_angular_speed", self.max_angular_speed),
            ("position_limit", self.position_limit),
        ] {
            if !(value > 0.0) {
                return Err(PhysicsError::InvalidArgument(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if let Some(gravity) = &self.central_gravity {
            if !gravity.center.is_finite() || !gravity.strength.is_finite() {
                return Err(PhysicsError::InvalidArgument(format!(
                    "central gravity must be finite, got {:?}",
                    gravity
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str, value: f64) -> PhysicsError {
    PhysicsError::InvalidArgument(format!("{}, got {}", message, value))
}
