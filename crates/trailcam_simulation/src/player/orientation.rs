//! OrientationModel — поворот facing к planar velocity с ограниченной угловой скоростью
//!
//! - Скорость поворота фиксированная (градусы/сек), shortest arc
//! - При planar speed² ≤ 1e-4 ориентация не трогается (нет jitter в покое, нет snap к нулю)
//! - Работает раз в visual frame, независимо от physics tick rate

use bevy::prelude::*;

use super::locomotion::MOVEMENT_EPSILON_SQ;

/// Look rotation по planar velocity (forward = -Z, up = +Y)
pub fn look_rotation(velocity: Vec3) -> Option<Quat> {
    let planar = Vec3::new(velocity.x, 0.0, velocity.z);
    if planar.length_squared() <= MOVEMENT_EPSILON_SQ {
        return None;
    }

    Some(Transform::IDENTITY.looking_to(planar, Vec3::Y).rotation)
}

/// Повернуть `current` к `target` не больше чем на `max_radians`
pub fn rotate_towards(current: Quat, target: Quat, max_radians: f32) -> Quat {
    let angle = current.angle_between(target);
    if angle <= max_radians || angle <= f32::EPSILON {
        return target;
    }

    // slerp идёт по кратчайшей дуге
    current.slerp(target, max_radians / angle)
}

/// Новый facing для frame
pub fn orient_towards_velocity(current: Quat, velocity: Vec3, rotation_speed_deg: f32, dt: f32) -> Quat {
    let Some(target) = look_rotation(velocity) else {
        return current;
    };

    let max_step = (rotation_speed_deg * dt).max(0.0).to_radians();
    rotate_towards(current, target, max_step)
}
