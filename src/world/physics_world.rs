use crate::collision::{CollisionCase, EntityCollisionHandler, SpatialGrid};
use crate::config::WorldConfig;
use crate::error::{PhysicsError, Result};
use crate::integration::integrator;
use crate::objects::{EntityId, PhysicalEntity};
use crate::world::events::{CollisionEvent, TickReport};
use crate::world::resolution;

/// Owns every entity and the broad-phase grid, and drives the tick.
pub struct PhysicsWorld {
    entities: Vec<PhysicalEntity>,
    grid: SpatialGrid,
    config: WorldConfig,
    // Queued until drained by the caller
    events: Vec<CollisionEvent>,
}

impl PhysicsWorld {
    /// Creates an empty world, validating the configuration.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialGrid::new(config.grid_columns, config.grid_rows, config.cell_size_log2)?;
        log::debug!(
            "created physics world: grid {}x{}, central gravity {:?}",
            config.grid_columns,
            config.grid_rows,
            config.central_gravity
        );
        Ok(Self {
            entities: Vec::new(),
            grid,
            config,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds an entity to the world and returns its id.
    pub fn add_entity(&mut self, entity: PhysicalEntity) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&PhysicalEntity> {
        self.entities.get(id.0)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut PhysicalEntity> {
        self.entities.get_mut(id.0)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &PhysicalEntity)> {
        self.entities.iter().enumerate().map(|(i, e)| (EntityId(i), e))
    }

    /// Makes `a` and `b` ignore each other for good.
    pub fn ignore_collisions(&mut self, a: EntityId, b: EntityId) -> Result<()> {
        if a == b {
            return Err(PhysicsError::SelfCollision(a));
        }
        let (ea, eb) = entity_pair_mut(&mut self.entities, a, b)?;
        ea.collision_mut().ignore(b);
        eb.collision_mut().ignore(a);
        Ok(())
    }

    /// Files an entity into every grid bucket its bounding circle overlaps.
    pub fn add_entity_to_grid(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entities.get(id.0).ok_or(PhysicsError::UnknownEntity(id))?;
        self.grid.insert_circle(id, entity.position(), entity.bounding_radius());
        Ok(())
    }

    /// Queued collision notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the simulation by `time` seconds.
    ///
    /// Motion is integrated first, then every bucketed pair is tested, and
    /// only after all detection is done are the cases resolved in order.
    pub fn tick(&mut self, time: f64) -> TickReport {
        let mut report = TickReport::default();

        // 1. Forces and integration
        for entity in self.entities.iter_mut() {
            entity.collision_mut().clear_collided();
            if let Some(gravity) = &self.config.central_gravity {
                integrator::apply_central_gravity(entity, gravity, time);
            }
            integrator::integrate(entity, time, &self.config);
        }

        // 2. Broad phase
        self.grid.clear();
        for id in (0..self.entities.len()).map(EntityId) {
            if let Err(e) = self.add_entity_to_grid(id) {
                log::warn!("skipping grid insert: {}", e);
            }
        }
        let pairs = self.grid.query_potential_pairs();
        report.candidate_pairs = pairs.len();

        // 3. Narrow phase
        let cases = self.detect(&pairs);
        report.cases = cases.len();

        // 4. Resolution, both sides of every case
        for case in &cases {
            for side in [case.clone(), case.inverse()] {
                let Ok((this, other)) = entity_pair_mut(&mut self.entities, side.entity, side.target) else {
                    continue;
                };
                if let Some(event) = resolution::resolve_case(this, other, &side, time, &self.config) {
                    if event.is_hard() {
                        report.hard_collisions += 1;
                    } else {
                        report.soft_collisions += 1;
                    }
                    self.events.push(event);
                }
            }
        }

        self.grid.clear();
        log::debug!(
            "tick {:.4}s: {} entities, {} candidate pairs, {} cases ({} hard, {} soft)",
            time,
            self.entities.len(),
            report.candidate_pairs,
            report.cases,
            report.hard_collisions,
            report.soft_collisions
        );
        report
    }

    fn detect(&mut self, pairs: &[(EntityId, EntityId)]) -> Vec<CollisionCase> {
        let mut cases = Vec::new();
        for &(a, b) in pairs {
            let (Some(ea), Some(eb)) = (self.entities.get(a.0), self.entities.get(b.0)) else {
                continue;
            };
            if let Some(case) = EntityCollisionHandler::test_against_entity(a, ea, b, eb) {
                self.entities[a.0].collision_mut().mark_collided(b);
                self.entities[b.0].collision_mut().mark_collided(a);
                cases.push(case);
            }
        }
        cases
    }
}

/// Mutable access to two distinct entities at once.
fn entity_pair_mut(
    entities: &mut [PhysicalEntity],
    a: EntityId,
    b: EntityId,
) -> Result<(&mut PhysicalEntity, &mut PhysicalEntity)> {
    if a == b {
        return Err(PhysicsError::SelfCollision(a));
    }
    for id in [a, b] {
        if id.0 >= entities.len() {
            return Err(PhysicsError::UnknownEntity(id));
        }
    }
    if a.0 < b.0 {
        let (low, high) = entities.split_at_mut(b.0);
        Ok((&mut low[a.0], &mut high[0]))
    } else {
        let (low, high) = entities.split_at_mut(a.0);
        Ok((&mut high[0], &mut low[b.0]))
    }
}
