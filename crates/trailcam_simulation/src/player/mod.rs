//! Player domain — locomotion + orientation
//!
//! Содержит:
//! - Player (marker)
//! - Locomotion (LocomotionModel: input → velocity, PhysicsDriven | Kinematic)
//! - orientation (OrientationModel: facing → velocity)
//! - TeleportIntent (event)
//! - PlayerPlugin (системы в Update / FixedUpdate)

pub mod components;
pub mod events;
pub mod locomotion;
pub mod orientation;
pub mod spawn;
pub mod systems;

pub use components::*;
pub use events::*;
pub use locomotion::{compute_target_velocity, step_velocity, Locomotion, LocomotionMode};
pub use spawn::spawn_player;

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

use crate::GameplaySet;

/// Player Plugin
///
/// Порядок в Update:
/// 1. GameplaySet::Input — map_player_input
/// 2. GameplaySet::Locomotion — teleport → target velocity → kinematic → orientation
///
/// FixedUpdate: physics_locomotion ДО rapier SyncBackend.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeleportIntent>()
            .register_type::<Locomotion>()
            .add_systems(Update, systems::map_player_input.in_set(GameplaySet::Input))
            .add_systems(
                Update,
                (
                    systems::process_teleport_intents,
                    systems::update_target_velocity,
                    systems::kinematic_locomotion,
                    systems::orient_towards_velocity,
                )
                    .chain()
                    .in_set(GameplaySet::Locomotion),
            )
            .add_systems(
                FixedUpdate,
                systems::physics_locomotion.before(PhysicsSet::SyncBackend),
            );
    }
}
