use crate::config::{CentralGravity, WorldConfig};
use crate::math::Vec2;
use crate::objects::PhysicalEntity;

/// Advances an entity's placement by its motion over `dt` seconds.
///
/// Motion and placement are clamped to the configured limits afterwards and
/// any NaN is reset to zero.
pub fn integrate(entity: &mut PhysicalEntity, dt: f64, config: &WorldConfig) {
    if !(dt > 0.0) {
        return;
    }

    let motion = limit_motion(entity.motion(), config.max_speed);
    let angular_motion = limit_angular(entity.angular_motion(), config.max_angular_speed);
    if motion != entity.motion() || angular_motion != entity.angular_motion() {
        if !entity.motion().is_finite() || !entity.angular_motion().is_finite() {
            log::warn!(
                "non-finite motion {:?} / {} reset before integration",
                entity.motion(),
                entity.angular_motion()
            );
        }
        entity.set_motion(motion);
        entity.set_angular_motion(angular_motion);
    }

    // p = p + v*dt, theta = theta + omega*dt
    let mut position = entity.position() + motion * dt;
    let rotation = wrap_angle(entity.rotation() + angular_motion * dt);

    if !position.is_finite() {
        log::warn!("non-finite position {:?} sanitized", position);
        position = position.sanitized();
    }
    entity.set_transform(position.clamp_components(config.position_limit), rotation);
}

/// Pulls an entity towards the gravity centre with `strength * mass / r²`,
/// scaled by `dt` and applied at the entity position.
pub fn apply_central_gravity(entity: &mut PhysicalEntity, gravity: &CentralGravity, dt: f64) {
    let offset = gravity.center - entity.position();
    let distance_squared = offset.magnitude_squared();
    if distance_squared <= f64::EPSILON {
        return;
    }
    let magnitude = gravity.strength * entity.mass() / distance_squared;
    let force = offset.normalize() * magnitude * dt;
    if force.is_finite() {
        entity.apply_force(force, entity.position());
    }
}

fn limit_motion(motion: Vec2, max_speed: f64) -> Vec2 {
    motion.sanitized().clamp_length(max_speed).sanitized()
}

fn limit_angular(angular_motion: f64, max_angular_speed: f64) -> f64 {
    if angular_motion.is_nan() {
        0.0
    } else {
        angular_motion.clamp(-max_angular_speed, max_angular_speed)
    }
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
