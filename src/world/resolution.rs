//! Per-case collision response: push-out, then impulse or damping.

use crate::collision::{intersect_bound_refs, CollisionCase};
use crate::config::WorldConfig;
use crate::math::Vec2;
use crate::objects::PhysicalEntity;
use crate::world::events::CollisionEvent;

/// Resolves `case` from the point of view of `this` (the case's entity).
///
/// Only `this` has its motion changed; `other` may be moved by push-out when
/// it is the lighter body. Call once more with the inverse case and the
/// arguments swapped to resolve the other side.
pub(crate) fn resolve_case(
    this: &mut PhysicalEntity,
    other: &mut PhysicalEntity,
    case: &CollisionCase,
    time: f64,
    config: &WorldConfig,
) -> Option<CollisionEvent> {
    let (Some(part), Some(other_part)) = (this.part(case.bound.part), other.part(case.target_bound.part)) else {
        return None;
    };
    let material = *part.material();
    let other_material = *other_part.material();

    if material.is_solid() && other_material.is_solid() {
        push_out(this, other, case, config);
        let bounciness = (material.bounciness + other_material.bounciness) / 2.0;
        let friction = (material.friction + other_material.friction) / 2.0;
        hard_collision(this, other.mass(), case, bounciness, friction)
    } else {
        soft_collision(this, case, time, config);
        Some(CollisionEvent::Soft {
            entity: case.entity,
            other: case.target,
            part: case.bound.part,
            other_part: case.target_bound.part,
        })
    }
}

/// Steps the lighter body out of the heavier one until the case's bound pair
/// stops intersecting, then walks back towards the heavier body by halving
/// steps while it stays clear. Equal masses move `other`.
///
/// Returns whether anything moved.
pub(crate) fn push_out(
    this: &mut PhysicalEntity,
    other: &mut PhysicalEntity,
    case: &CollisionCase,
    config: &WorldConfig,
) -> bool {
    let this_is_heavier = this.mass() >= other.mass();
    let (heavy, light, heavy_ref, light_ref) = if this_is_heavier {
        (&*this, &mut *other, case.bound, case.target_bound)
    } else {
        (&*other, &mut *this, case.target_bound, case.bound)
    };
    if !heavy.reaction_enabled {
        return false;
    }

    let touching = |light: &PhysicalEntity| !intersect_bound_refs(light, light_ref, heavy, heavy_ref).is_empty();
    if !touching(&*light) {
        return false;
    }

    let direction = (light.position() - heavy.position()).normalize_or(Vec2::DOWN);
    let step = direction * config.push_out_step;
    let mut position = light.position();
    let mut steps = 0;
    while touching(&*light) {
        if steps == config.push_out_max_steps {
            log::warn!(
                "push-out of {:?} from {:?} gave up after {} steps",
                if this_is_heavier { case.target } else { case.entity },
                if this_is_heavier { case.entity } else { case.target },
                steps
            );
            return true;
        }
        position += step;
        light.set_position(position);
        steps += 1;
    }
    log::trace!("push-out cleared after {} steps at {:?}", steps, position);

    let mut back = step;
    for _ in 0..config.push_out_refinements {
        back = back / 2.0;
        let candidate = position - back;
        light.set_position(candidate);
        if touching(&*light) {
            light.set_position(position);
        } else {
            position = candidate;
        }
        log::trace!("push-out refinement to {:?}", position);
    }
    true
}

/// Exchanges normal velocity with the other body and applies friction to the
/// tangent, as an impulse on `this` only.
///
/// Tangent speed becomes `tangent · (1 - friction)`: friction is the share
/// removed, not the share kept.
///
/// With `c = (ms·vs + mt·vt) / (ms + mt)` along the normal, the new normal
/// speed is `c - (vs - c)·bounciness`. Bodies already separating are left
/// alone.
fn hard_collision(
    this: &mut PhysicalEntity,
    other_mass: f64,
    case: &CollisionCase,
    bounciness: f64,
    friction: f64,
) -> Option<CollisionEvent> {
    let mass = this.mass();
    if mass <= 0.0 {
        return None;
    }
    let normal = case.normal;
    let tangent = normal.perpendicular();
    let velocity = case.motion_at_contact();
    let target_velocity = case.target_motion_at_contact();

    let normal_speed = velocity.dot(normal);
    let target_normal_speed = target_velocity.dot(normal);
    if normal_speed - target_normal_speed <= 0.0 {
        return None;
    }

    let total_mass = mass + other_mass.max(0.0);
    let common = (mass * normal_speed + other_mass.max(0.0) * target_normal_speed) / total_mass;
    let new_normal_speed = common - (normal_speed - common) * bounciness;

    let tangent_speed = velocity.dot(tangent);
    let new_tangent_speed = tangent_speed * (1.0 - friction);

    let delta = normal * (new_normal_speed - normal_speed) + tangent * (new_tangent_speed - tangent_speed);
    let impulse = delta * mass;
    if !impulse.is_finite() {
        log::warn!("non-finite impulse {:?} dropped for {:?}", impulse, case.entity);
        return None;
    }
    this.apply_force(impulse, case.contact_point);

    let magnitude = impulse.magnitude();
    let invulnerable = this.invulnerable;
    if let Some(part) = this.part_mut(case.bound.part) {
        part.notify_collision(magnitude, invulnerable);
    }
    Some(CollisionEvent::Hard {
        entity: case.entity,
        other: case.target,
        part: case.bound.part,
        other_part: case.target_bound.part,
        contact_point: case.contact_point,
        impulse: magnitude,
    })
}

/// Damps motion relative to the other body by `retention^time`.
fn soft_collision(this: &mut PhysicalEntity, case: &CollisionCase, time: f64, config: &WorldConfig) {
    let factor = config.soft_collision_retention.powf(time.max(0.0));
    let relative = case.motion - case.target_motion;
    this.set_motion(case.target_motion + relative * factor);
    this.set_angular_motion(this.angular_motion() * factor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::EntityCollisionHandler;
    use crate::common::{Material, MatterState};
    use crate::objects::EntityId;
    use crate::shapes::{BallBound, CollisionBound, RectangleBound};
    const EPSILON: f64 = 1e-9;

    fn rect_entity(w: f64, h: f64, position: Vec2, material: Material) -> PhysicalEntity {
        let bounds: Vec<CollisionBound> = vec![RectangleBound::new(Vec2::new(w, h), Vec2::ZERO, 0.0).unwrap().into()];
        let mut entity = PhysicalEntity::new(material, bounds).unwrap();
        entity.set_position(position);
        entity
    }

    fn ball_entity(radius: f64, position: Vec2, material: Material) -> PhysicalEntity {
        let bounds: Vec<CollisionBound> = vec![BallBound::new(radius, Vec2::ZERO).unwrap().into()];
        let mut entity = PhysicalEntity::new(material, bounds).unwrap();
        entity.set_position(position);
        entity
    }

    fn elastic() -> Material {
        Material {
            bounciness: 1.0,
            friction: 0.0,
            ..Material::default()
        }
    }

    fn detect(a: &PhysicalEntity, b: &PhysicalEntity) -> CollisionCase {
        EntityCollisionHandler::test_against_entity(EntityId(0), a, EntityId(1), b).unwrap()
    }

    #[test]
    fn test_push_out_moves_lighter_body() {
        // Masses 100 and 10, overlapping along x.
        let mut heavy = rect_entity(10.0, 10.0, Vec2::ZERO, Material::default());
        let mut light = rect_entity(2.0, 5.0, Vec2::new(5.5, 0.0), Material::default());
        assert!((heavy.mass() - 100.0).abs() < EPSILON);
        assert!((light.mass() - 10.0).abs() < EPSILON);

        let case = detect(&light, &heavy);
        let config = WorldConfig::default();
        assert!(push_out(&mut light, &mut heavy, &case, &config));

        assert_eq!(heavy.position(), Vec2::ZERO);
        assert!(light.position().x > 5.5);
        assert!(light.position().y.abs() < EPSILON);
        assert!(intersect_bound_refs(&light, case.bound, &heavy, case.target_bound).is_empty());
        // Refinement keeps the gap smaller than one step.
        assert!(light.position().x - 6.0 < config.push_out_step);

        // Already clear: nothing left to do.
        assert!(!push_out(&mut heavy, &mut light, &case.inverse(), &config));
    }

    #[test]
    fn test_push_out_needs_reaction_on_heavier_side() {
        let mut heavy = rect_entity(10.0, 10.0, Vec2::ZERO, Material::default());
        heavy.reaction_enabled = false;
        let mut light = rect_entity(2.0, 5.0, Vec2::new(5.5, 0.0), Material::default());
        let case = detect(&heavy, &light);
        assert!(!push_out(&mut heavy, &mut light, &case, &WorldConfig::default()));
        assert_eq!(light.position(), Vec2::new(5.5, 0.0));
    }

    #[test]
    fn test_push_out_budget_exhausted_keeps_progress() {
        let mut heavy = rect_entity(10.0, 10.0, Vec2::ZERO, Material::default());
        let mut light = rect_entity(2.0, 5.0, Vec2::new(5.5, 0.0), Material::default());
        let case = detect(&heavy, &light);
        let config = WorldConfig {
            push_out_step: 0.01,
            push_out_max_steps: 3,
            ..WorldConfig::default()
        };
        assert!(push_out(&mut heavy, &mut light, &case, &config));
        assert!((light.position().x - 5.53).abs() < 1e-6);
    }

    #[test]
    fn test_elastic_head_on_conserves_normal_energy() {
        let v = 4.0;
        let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), elastic());
        let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), elastic());
        a.set_motion(Vec2::new(v, 0.0));
        b.set_motion(Vec2::new(-v, 0.0));
        let case = detect(&a, &b);
        let config = WorldConfig::default();

        let before = a.mass() * v * v / 2.0 + b.mass() * v * v / 2.0;
        let ea = resolve_case(&mut a, &mut b, &case, 0.1, &config).unwrap();
        let eb = resolve_case(&mut b, &mut a, &case.inverse(), 0.1, &config).unwrap();
        assert!(ea.is_hard() && eb.is_hard());

        assert!((a.motion().x + v).abs() < 1e-6, "{:?}", a.motion());
        assert!((b.motion().x - v).abs() < 1e-6, "{:?}", b.motion());
        let after = a.mass() * a.motion().x.powi(2) / 2.0 + b.mass() * b.motion().x.powi(2) / 2.0;
        assert!((before - after).abs() < 1e-6);
        assert!(a.angular_motion().abs() < 1e-9);
    }

    #[test]
    fn test_inelastic_collision_moves_together() {
        let sticky = Material {
            bounciness: 0.0,
            friction: 0.0,
            ..Material::default()
        };
        let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), sticky);
        let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), sticky);
        a.set_motion(Vec2::new(2.0, 0.0));
        let case = detect(&a, &b);
        let config = WorldConfig::default();
        resolve_case(&mut a, &mut b, &case, 0.1, &config);
        resolve_case(&mut b, &mut a, &case.inverse(), 0.1, &config);
        assert!((a.motion().x - 1.0).abs() < 1e-6);
        assert!((b.motion().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_friction_removes_its_share_of_tangent_motion() {
        for (friction, expected) in [(0.0, 1.0), (0.25, 0.75), (1.0, 0.0)] {
            let material = Material {
                bounciness: 0.0,
                friction,
                ..Material::default()
            };
            let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), material);
            let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), material);
            a.set_motion(Vec2::new(2.0, 1.0));
            let case = detect(&a, &b);
            resolve_case(&mut a, &mut b, &case, 0.1, &WorldConfig::default());
            assert!((a.motion().x - 1.0).abs() < 1e-6, "friction {}", friction);
            assert!((a.motion().y - expected).abs() < 1e-6, "friction {}: {:?}", friction, a.motion());
        }
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), elastic());
        let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), elastic());
        a.set_motion(Vec2::new(-1.0, 0.0));
        let case = detect(&a, &b);
        assert!(resolve_case(&mut a, &mut b, &case, 0.1, &WorldConfig::default()).is_none());
        assert_eq!(a.motion(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_hard_collision_damages_part() {
        let fragile = Material {
            strength: 1.0,
            ..elastic()
        };
        let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), fragile);
        let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), fragile);
        a.set_motion(Vec2::new(1.0, 0.0));
        b.invulnerable = true;
        b.set_motion(Vec2::new(-1.0, 0.0));
        let case = detect(&a, &b);
        let config = WorldConfig::default();
        let Some(CollisionEvent::Hard { impulse, .. }) = resolve_case(&mut a, &mut b, &case, 0.1, &config) else {
            panic!("expected a hard collision");
        };
        resolve_case(&mut b, &mut a, &case.inverse(), 0.1, &config);

        let part = a.part(a.root()).unwrap();
        assert!((part.damage() - impulse).abs() < EPSILON);
        assert_eq!(part.impact_count(), 1);
        assert_eq!(b.part(b.root()).unwrap().damage(), 0.0);
        assert_eq!(b.part(b.root()).unwrap().impact_count(), 1);
    }

    #[test]
    fn test_liquid_contact_is_soft() {
        let liquid = Material {
            state: MatterState::Liquid,
            ..Material::default()
        };
        let mut a = ball_entity(1.0, Vec2::new(-0.9, 0.0), Material::default());
        let mut b = ball_entity(1.0, Vec2::new(0.9, 0.0), liquid);
        a.set_motion(Vec2::new(10.0, 0.0));
        a.set_angular_motion(2.0);
        let case = detect(&a, &b);
        let config = WorldConfig {
            soft_collision_retention: 0.25,
            ..WorldConfig::default()
        };
        let event = resolve_case(&mut a, &mut b, &case, 1.0, &config).unwrap();
        assert!(!event.is_hard());
        assert!((a.motion().x - 2.5).abs() < EPSILON);
        assert!((a.angular_motion() - 0.5).abs() < EPSILON);
        // No push-out for soft contacts.
        assert_eq!(b.position(), Vec2::new(0.9, 0.0));
    }
}
