//! Player systems (ECS)
//!
//! # Update (visual frame)
//! 1. `map_player_input` — PlayerInputFrame → InputMapper → Locomotion.raw_input
//! 2. `process_teleport_intents` — TeleportIntent → позиция напрямую
//! 3. `update_target_velocity` — input × heading камеры → target velocity
//! 4. `kinematic_locomotion` — только Kinematic: velocity step + position += v·dt
//! 5. `orient_towards_velocity` — facing к planar velocity (оба режима)
//!
//! # FixedUpdate (physics tick)
//! - `physics_locomotion` — только PhysicsDriven: velocity → rapier body (до SyncBackend)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{TransformInterpolation, Velocity};

use super::components::Player;
use super::events::TeleportIntent;
use super::locomotion::{Locomotion, LocomotionMode};
use super::orientation;
use crate::camera::CameraHeading;
use crate::config::Tunables;
use crate::input::{map_move_input, PlayerInputFrame};
use crate::logger;

pub fn map_player_input(
    frame: Res<PlayerInputFrame>,
    tunables: Res<Tunables>,
    mut players: Query<&mut Locomotion, With<Player>>,
) {
    let input = map_move_input(&frame.sources, tunables.input.analog_dead_zone);

    for mut locomotion in players.iter_mut() {
        locomotion.set_move_input(input);
    }
}

pub fn process_teleport_intents(
    mut events: EventReader<TeleportIntent>,
    mut actors: Query<(
        &mut Locomotion,
        &mut Transform,
        Option<&mut Velocity>,
        Option<&mut TransformInterpolation>,
    )>,
) {
    for event in events.read() {
        let Ok((mut locomotion, mut transform, body, interpolation)) = actors.get_mut(event.entity) else {
            logger::log_warning(&format!(
                "TeleportIntent: entity {:?} has no Locomotion/Transform, ignored",
                event.entity
            ));
            continue;
        };

        locomotion.teleport(
            &mut transform,
            body.map(|body| body.into_inner()),
            interpolation.map(|interpolation| interpolation.into_inner()),
            event.position,
            event.reset_velocity,
        );

        logger::log(&format!(
            "Teleport {:?} → {:?} (reset_velocity: {})",
            event.entity, event.position, event.reset_velocity
        ));
    }
}

pub fn update_target_velocity(heading: Res<CameraHeading>, mut actors: Query<&mut Locomotion>) {
    for mut locomotion in actors.iter_mut() {
        locomotion.refresh_target(heading.rotation);
    }
}

pub fn kinematic_locomotion(time: Res<Time>, mut actors: Query<(&mut Locomotion, &mut Transform)>) {
    let delta = time.delta_secs();

    for (mut locomotion, mut transform) in actors.iter_mut() {
        if locomotion.mode() != LocomotionMode::Kinematic {
            continue;
        }

        locomotion.advance_kinematic(&mut transform, delta);
    }
}

/// PhysicsDriven: пишем velocity в rapier body, позицию интегрирует rapier
///
/// Работает в FixedUpdate. Y velocity остаётся за rapier (гравитация, прыжки).
pub fn physics_locomotion(time: Res<Time<Fixed>>, mut actors: Query<(&mut Locomotion, &mut Velocity)>) {
    let delta = time.delta_secs();

    for (mut locomotion, mut body) in actors.iter_mut() {
        if locomotion.mode() != LocomotionMode::PhysicsDriven {
            continue;
        }

        locomotion.drive_body(&mut body, delta);
    }
}

pub fn orient_towards_velocity(time: Res<Time>, mut actors: Query<(&Locomotion, &mut Transform)>) {
    let delta = time.delta_secs();

    for (locomotion, mut transform) in actors.iter_mut() {
        let rotation = orientation::orient_towards_velocity(
            transform.rotation,
            locomotion.current_velocity(),
            locomotion.rotation_speed,
            delta,
        );

        // Не трогаем Transform без нужды (rapier воспринимает Changed<Transform> как teleport body)
        if rotation != transform.rotation {
            transform.rotation = rotation;
        }
    }
}
