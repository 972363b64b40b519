use crate::common::{Material, MatterState};
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};
use crate::shapes::CollisionBound;

/// Stable index of a part inside its entity's part arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

/// Rigid parent→child connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartLink {
    pub child: PartId,
    /// Child position relative to the parent, in the parent's rotated frame.
    pub offset: Vec2,
    /// Breakage threshold, interpreted by gameplay code.
    pub strength: f64,
}

/// A node of an entity's rigid skeleton.
///
/// World placement is derived from the parent chain and only written by the
/// owning entity's transform propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    self_rotation: f64,
    transform: Transform,
    bounds: Vec<CollisionBound>,
    material: Material,
    pub(crate) links: Vec<PartLink>,
    pub(crate) parent: Option<PartId>,
    mass: f64,

    damage: f64,
    last_impulse: f64,
    impact_count: u32,
}

impl Part {
    /// Creates an unattached part.
    pub fn new(material: Material, bounds: Vec<CollisionBound>) -> Result<Self> {
        validate_material(&material)?;
        let mut part = Part {
            self_rotation: 0.0,
            transform: Transform::identity(),
            bounds,
            material,
            links: Vec::new(),
            parent: None,
            mass: 0.0,
            damage: 0.0,
            last_impulse: 0.0,
            impact_count: 0,
        };
        part.recompute_mass();
        Ok(part)
    }

    /// Builder-style setter for the rotation relative to the parent.
    pub fn with_self_rotation(mut self, rotation: f64) -> Self {
        self.self_rotation = rotation;
        self
    }

    pub fn self_rotation(&self) -> f64 {
        self.self_rotation
    }

    /// World position.
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Self rotation plus every ancestor's rotation and the entity rotation.
    pub fn combined_rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn bounds(&self) -> &[CollisionBound] {
        &self.bounds
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn links(&self) -> &[PartLink] {
        &self.links
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    /// Sum of `area * density` over the bounds.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Accumulated `impulse / strength` from hard collisions.
    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn last_impulse(&self) -> f64 {
        self.last_impulse
    }

    pub fn impact_count(&self) -> u32 {
        self.impact_count
    }

    /// Whether this part can touch anything at all.
    pub fn is_collidable(&self) -> bool {
        !self.bounds.is_empty() && self.material.state != MatterState::Gas
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub(crate) fn set_self_rotation(&mut self, rotation: f64) {
        self.self_rotation = rotation;
    }

    pub(crate) fn replace_bounds(&mut self, bounds: Vec<CollisionBound>) {
        self.bounds = bounds;
        self.recompute_mass();
    }

    pub(crate) fn replace_material(&mut self, material: Material) -> Result<()> {
        validate_material(&material)?;
        self.material = material;
        self.recompute_mass();
        Ok(())
    }

    /// Hard-collision notification.
    pub(crate) fn notify_collision(&mut self, impulse: f64, invulnerable: bool) {
        self.last_impulse = impulse;
        self.impact_count += 1;
        if !invulnerable && self.material.strength > 0.0 {
            self.damage += impulse / self.material.strength;
        }
    }

    fn recompute_mass(&mut self) {
        let density = self.material.density;
        self.mass = self.bounds.iter().map(|b| b.area() * density).sum();
    }
}

fn validate_material(material: &Material) -> Result<()> {
    if !material.density.is_finite() || material.density < 0.0 {
        return Err(PhysicsError::InvalidArgument(format!(
            "part material density must be finite and non-negative, got {}",
            material.density
        )));
    }
    Ok(())
}
