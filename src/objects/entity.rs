use crate::collision::EntityCollisionHandler;
use crate::common::Material;
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};
use crate::objects::part::{Part, PartId, PartLink};
use crate::shapes::CollisionBound;

/// Stable index of an entity inside a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// A simulated rigid composite body.
///
/// Owns an arena of parts. Exactly one of them is the root; the attached set
/// is whatever the root reaches through links. Unlinked parts stay in the
/// arena with their last transform but no longer move, weigh or collide.
#[derive(Debug, Clone)]
pub struct PhysicalEntity {
    position: Vec2,
    rotation: f64,
    motion: Vec2,
    angular_motion: f64,

    parts: Vec<Part>,
    root: PartId,

    // Derived, refreshed on every topology/bound change.
    mass: f64,
    center_of_mass: Vec2,
    bounding_radius: f64,

    pub invulnerable: bool,
    /// Whether this entity pushes lighter bodies out of itself.
    pub reaction_enabled: bool,

    collision: EntityCollisionHandler,
}

impl PhysicalEntity {
    /// Creates an entity whose root part has the given material and bounds.
    pub fn new(material: Material, bounds: Vec<CollisionBound>) -> Result<Self> {
        Ok(Self::from_root(Part::new(material, bounds)?))
    }

    /// Creates an entity around an already-built root part.
    pub fn from_root(mut root: Part) -> Self {
        root.parent = None;
        root.links.clear();
        let mut entity = Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            motion: Vec2::ZERO,
            angular_motion: 0.0,
            parts: vec![root],
            root: PartId(0),
            mass: 0.0,
            center_of_mass: Vec2::ZERO,
            bounding_radius: 0.0,
            invulnerable: false,
            reaction_enabled: true,
            collision: EntityCollisionHandler::new(),
        };
        entity.refresh();
        entity
    }

    // --- Placement ---

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.set_transform(position, self.rotation);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.set_transform(self.position, rotation);
    }

    /// Moves the entity and pushes the new placement down the part tree.
    pub fn set_transform(&mut self, position: Vec2, rotation: f64) {
        self.position = position.sanitized();
        self.rotation = if rotation.is_nan() { 0.0 } else { rotation };
        self.propagate();
    }

    // --- Motion ---

    pub fn motion(&self) -> Vec2 {
        self.motion
    }

    pub fn set_motion(&mut self, motion: Vec2) {
        self.motion = motion.sanitized();
    }

    /// Angular speed in radians per second.
    pub fn angular_motion(&self) -> f64 {
        self.angular_motion
    }

    pub fn set_angular_motion(&mut self, angular_motion: f64) {
        self.angular_motion = if angular_motion.is_nan() { 0.0 } else { angular_motion };
    }

    /// Tangential velocity at `point` caused by the entity's spin.
    ///
    /// Magnitude is `distance * angular_motion`, directed along the
    /// perpendicular of the position→point vector.
    pub fn angular_motion_at(&self, point: Vec2) -> Vec2 {
        (point - self.position).perpendicular() * self.angular_motion
    }

    /// Linear plus rotational velocity at `point`.
    pub fn motion_at(&self, point: Vec2) -> Vec2 {
        self.motion + self.angular_motion_at(point)
    }

    /// Applies an instantaneous force at a world location.
    ///
    /// Linear motion changes by `force / mass`. The turning effect uses the
    /// unit lever from the entity position, its perpendicular dotted with the
    /// force, scaled by the distance of `location` from the centre of mass and
    /// divided by `distance² * mass`. Degenerate results become zero.
    pub fn apply_force(&mut self, force: Vec2, location: Vec2) {
        if self.mass <= 0.0 {
            return;
        }
        self.motion = (self.motion + force / self.mass).sanitized();

        let lever = (location - self.position).normalize();
        let distance = location.distance(self.center_of_mass);
        let torque = lever.perpendicular().dot(force) * distance;
        let inertia = distance * distance * self.mass;
        let angular_acceleration = torque / inertia;
        if angular_acceleration.is_finite() {
            self.angular_motion += angular_acceleration;
        }
    }

    // --- Derived quantities ---

    /// Total mass of the attached parts.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn center_of_mass(&self) -> Vec2 {
        self.center_of_mass
    }

    /// Distance from the entity position to the farthest point of any bound.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    // --- Part tree ---

    pub fn root(&self) -> PartId {
        self.root
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0)
    }

    pub(crate) fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(id.0)
    }

    /// Number of parts in the arena, attached or not.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Attached parts, root first, depth-first.
    pub fn attached_parts(&self) -> Vec<PartId> {
        let mut order = Vec::with_capacity(self.parts.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            for link in self.parts[id.0].links.iter().rev() {
                stack.push(link.child);
            }
        }
        order
    }

    pub fn is_attached(&self, id: PartId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parts.get(current.0).and_then(|p| p.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Adds a part to the arena without attaching it.
    pub fn insert_part(&mut self, mut part: Part) -> PartId {
        part.parent = None;
        part.links.clear();
        let id = PartId(self.parts.len());
        self.parts.push(part);
        id
    }

    /// Inserts `part` and links it under `parent` in one step.
    pub fn attach_part(&mut self, parent: PartId, part: Part, offset: Vec2, strength: f64) -> Result<PartId> {
        self.check_part(parent)?;
        let id = self.insert_part(part);
        self.link_part(parent, id, offset, strength)?;
        Ok(id)
    }

    /// Links an unparented part under `parent`.
    ///
    /// Fails if the child already has a parent, is the root, or is an ancestor
    /// of `parent`.
    pub fn link_part(&mut self, parent: PartId, child: PartId, offset: Vec2, strength: f64) -> Result<()> {
        self.check_part(parent)?;
        self.check_part(child)?;
        if self.parts[child.0].parent.is_some() {
            return Err(PhysicsError::PartAlreadyLinked { part: child });
        }
        if child == self.root {
            return Err(PhysicsError::LinkCycle { parent, child });
        }
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(PhysicsError::LinkCycle { parent, child });
            }
            ancestor = self.parts[id.0].parent;
        }
        if !offset.is_finite() {
            return Err(PhysicsError::InvalidArgument(format!(
                "link offset must be finite, got {:?}",
                offset
            )));
        }

        self.parts[parent.0].links.push(PartLink { child, offset, strength });
        self.parts[child.0].parent = Some(parent);
        self.refresh();
        Ok(())
    }

    /// Removes the link `parent → child`, returning every part of the
    /// detached subtree. The detached parts keep their last transform.
    pub fn unlink_part(&mut self, parent: PartId, child: PartId) -> Result<Vec<PartId>> {
        self.check_part(parent)?;
        self.check_part(child)?;
        let links = &mut self.parts[parent.0].links;
        let index = links
            .iter()
            .position(|l| l.child == child)
            .ok_or(PhysicsError::PartNotLinked { parent, child })?;
        links.remove(index);
        self.parts[child.0].parent = None;

        let mut orphans = Vec::new();
        let mut stack = vec![child];
        while let Some(id) = stack.pop() {
            orphans.push(id);
            stack.extend(self.parts[id.0].links.iter().map(|l| l.child));
        }
        self.refresh();
        Ok(orphans)
    }

    pub fn set_bounds(&mut self, id: PartId, bounds: Vec<CollisionBound>) -> Result<()> {
        self.check_part(id)?;
        self.parts[id.0].replace_bounds(bounds);
        self.refresh();
        Ok(())
    }

    pub fn set_material(&mut self, id: PartId, material: Material) -> Result<()> {
        self.check_part(id)?;
        self.parts[id.0].replace_material(material)?;
        self.refresh();
        Ok(())
    }

    pub fn set_part_rotation(&mut self, id: PartId, rotation: f64) -> Result<()> {
        self.check_part(id)?;
        self.parts[id.0].set_self_rotation(rotation);
        self.refresh();
        Ok(())
    }

    // --- Collision ---

    pub fn collision(&self) -> &EntityCollisionHandler {
        &self.collision
    }

    pub fn collision_mut(&mut self) -> &mut EntityCollisionHandler {
        &mut self.collision
    }

    fn check_part(&self, id: PartId) -> Result<()> {
        if id.0 < self.parts.len() {
            Ok(())
        } else {
            Err(PhysicsError::UnknownPart(id))
        }
    }

    /// Writes world transforms into every attached part, root first.
    fn propagate(&mut self) {
        let root_rotation = self.rotation + self.parts[self.root.0].self_rotation();
        self.parts[self.root.0].set_transform(Transform::new(self.position, root_rotation));

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let parent_transform = self.parts[id.0].transform();
            for i in 0..self.parts[id.0].links.len() {
                let link = self.parts[id.0].links[i];
                let child = &mut self.parts[link.child.0];
                let transform = parent_transform.child(link.offset, child.self_rotation());
                child.set_transform(transform);
                stack.push(link.child);
            }
        }
        self.update_center_of_mass();
    }

    fn update_center_of_mass(&mut self) {
        if self.mass <= 0.0 {
            self.center_of_mass = self.position;
            return;
        }
        let mut com = Vec2::ZERO;
        for id in self.attached_parts() {
            let part = &self.parts[id.0];
            com += part.position() * (part.mass() / self.mass);
        }
        self.center_of_mass = com;
    }

    /// Recomputes every derived quantity after a structural change.
    fn refresh(&mut self) {
        let attached = self.attached_parts();
        self.mass = attached.iter().map(|id| self.parts[id.0].mass()).sum();
        self.propagate();

        let mut radius: f64 = 0.0;
        for id in &attached {
            let part = &self.parts[id.0];
            for bound in part.bounds() {
                let reach = match bound {
                    CollisionBound::Rectangle(rect) => rect
                        .vertices(part.transform())
                        .iter()
                        .map(|v| v.distance(self.position))
                        .fold(0.0, f64::max),
                    CollisionBound::Ball(ball) => {
                        ball.world_center(part.transform()).distance(self.position) + ball.radius
                    }
                };
                radius = radius.max(reach);
            }
        }
        self.bounding_radius = radius;
    }
}
