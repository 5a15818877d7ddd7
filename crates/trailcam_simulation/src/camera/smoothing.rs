//! Critically damped spring (smooth damp) для позиции камеры
//!
//! Persistent `velocity` живёт в CameraFollow между кадрами; при snap обнуляется.

use bevy::prelude::*;

/// Минимальный smooth time (деление на omega)
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Сдвинуть `current` к `target` за ~`smooth_time` секунд
///
/// Аппроксимация exp(-ωt) полиномом, без max speed. Overshoot guard: если шаг
/// проскочил target, возвращаем ровно target и гасим velocity.
pub fn smooth_damp(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_without_overshoot() {
        let target = Vec3::new(4.0, 0.0, -2.0);
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;
        let start_distance = position.distance(target);

        let mut previous = start_distance;
        for _ in 0..120 {
            position = smooth_damp(position, target, &mut velocity, 0.15, 1.0 / 60.0);
            let distance = position.distance(target);
            assert!(distance <= previous + 1e-5, "distance grew: {} → {}", previous, distance);
            previous = distance;
        }

        assert!(previous < 1e-3, "did not converge: {}", previous);
    }

    #[test]
    fn test_partial_step_is_between_current_and_target() {
        let mut velocity = Vec3::ZERO;
        let next = smooth_damp(Vec3::ZERO, Vec3::X * 10.0, &mut velocity, 0.15, 1.0 / 60.0);
        assert!(next.x > 0.0 && next.x < 10.0);
        assert!(velocity.x > 0.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut velocity = Vec3::ONE;
        let next = smooth_damp(Vec3::ZERO, Vec3::X, &mut velocity, 0.15, 0.0);
        assert_eq!(next, Vec3::ZERO);
        assert_eq!(velocity, Vec3::ONE);
    }
}
