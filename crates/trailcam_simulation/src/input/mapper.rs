//! InputMapper — сводит analog + keyboard sources в один planar vector
//!
//! # Policy
//! - Из двух analog sources берём тот, у которого magnitude больше
//! - Если нажата хоть одна directional клавиша → digital vector перекрывает analog
//! - Результат всегда clamp до unit magnitude
//!
//! # Coordinate System
//! - `x`: -1.0 (left) → +1.0 (right)
//! - `y`: -1.0 (back) → +1.0 (forward)

use bevy::prelude::*;

/// Directional клавиши (WASD / стрелки), уже сведённые host'ом в bool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalKeys {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Digital vector: противоположные клавиши гасят друг друга
    pub fn as_vector(&self) -> Vec2 {
        let axis = |positive: bool, negative: bool| (positive as i8 - negative as i8) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.back))
    }
}

/// Sources одного кадра
///
/// `analog[0]` — gamepad left stick, `analog[1]` — вторичный analog-like source
/// (virtual/touch stick). Отсутствующее устройство = `Vec2::ZERO`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSources {
    pub analog: [Vec2; 2],
    pub keys: DirectionalKeys,
}

/// Сводит sources в PlanarVector (magnitude ≤ 1)
///
/// `dead_zone` — analog sources короче порога игнорируются (0.0 = выключено).
pub fn map_move_input(sources: &InputSources, dead_zone: f32) -> Vec2 {
    if sources.keys.any() {
        return sources.keys.as_vector().clamp_length_max(1.0);
    }

    let sanitize = |v: Vec2| {
        if !v.is_finite() || v.length() < dead_zone {
            Vec2::ZERO
        } else {
            v
        }
    };

    let [primary, secondary] = sources.analog.map(sanitize);
    let strongest = if secondary.length_squared() > primary.length_squared() {
        secondary
    } else {
        primary
    };

    strongest.clamp_length_max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_no_devices_yields_zero() {
        assert_eq!(map_move_input(&InputSources::default(), 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_larger_analog_source_wins() {
        let sources = InputSources {
            analog: [Vec2::new(0.2, 0.0), Vec2::new(0.0, -0.6)],
            ..default()
        };
        assert_eq!(map_move_input(&sources, 0.0), Vec2::new(0.0, -0.6));
    }

    #[test]
    fn test_keyboard_overrides_analog() {
        let sources = InputSources {
            analog: [Vec2::new(0.9, 0.0), Vec2::ZERO],
            keys: DirectionalKeys {
                forward: true,
                ..default()
            },
        };
        assert_eq!(map_move_input(&sources, 0.0), Vec2::Y);
    }

    #[test]
    fn test_diagonal_keys_are_normalized() {
        let sources = InputSources {
            keys: DirectionalKeys {
                forward: true,
                right: true,
                ..default()
            },
            ..default()
        };
        let result = map_move_input(&sources, 0.0);
        assert!((result.length() - 1.0).abs() < 1e-5, "length = {}", result.length());
        assert!((result.x - result.y).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = DirectionalKeys {
            left: true,
            right: true,
            ..default()
        };
        let sources = InputSources { keys, ..default() };
        assert_eq!(map_move_input(&sources, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_dead_zone_and_nan_are_ignored() {
        let sources = InputSources {
            analog: [Vec2::new(0.05, 0.05), Vec2::new(f32::NAN, 1.0)],
            ..default()
        };
        assert_eq!(map_move_input(&sources, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_output_magnitude_never_exceeds_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..5_000 {
            let sources = InputSources {
                analog: [
                    Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
                    Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
                ],
                keys: DirectionalKeys {
                    forward: rng.gen_bool(0.2),
                    back: rng.gen_bool(0.2),
                    left: rng.gen_bool(0.2),
                    right: rng.gen_bool(0.2),
                },
            };

            let result = map_move_input(&sources, 0.0);
            assert!(result.length() <= 1.0 + 1e-5, "{:?} → {:?}", sources, result);
        }
    }
}
