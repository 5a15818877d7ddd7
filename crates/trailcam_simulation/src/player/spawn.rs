//! Spawn helpers для player актора
//!
//! Режим движения выбирается здесь один раз:
//! - `PhysicsDriven` → RigidBody::Dynamic + Collider + Velocity + TransformInterpolation
//! - `Kinematic` → только Transform (никакого rapier body)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::Player;
use super::locomotion::{Locomotion, LocomotionMode};
use crate::config::PlayerTunables;

/// Capsule игрока: половина высоты цилиндра + радиус (итого 1.8m)
pub const PLAYER_HALF_HEIGHT: f32 = 0.5;
pub const PLAYER_RADIUS: f32 = 0.4;

pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    mode: LocomotionMode,
    tunables: &PlayerTunables,
) -> Entity {
    let mut entity = commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_translation(position),
        Locomotion::new(mode, tunables),
    ));

    if mode == LocomotionMode::PhysicsDriven {
        entity.insert((
            RigidBody::Dynamic,
            Collider::capsule_y(PLAYER_HALF_HEIGHT, PLAYER_RADIUS),
            Velocity::zero(),
            // Поворот задаёт OrientationModel, не физика
            LockedAxes::ROTATION_LOCKED,
            // Physics tick реже visual frame → интерполяция (rapier читает её в TimestepMode::Interpolated)
            TransformInterpolation::default(),
        ));
    }

    entity.id()
}
