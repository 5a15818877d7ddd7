//! Debug управление
//!
//! - `T` — телепорт игрока на spawn (velocity сбрасывается)
//! - `P` — прикрепить камеру к игроку / вернуть в follow режим

use bevy::prelude::*;
use trailcam_simulation::{
    AttachCamera, CameraFollow, CameraRegistry, DetachCamera, GameplaySet, Player, TeleportIntent,
};

use crate::PLAYER_SPAWN;

/// Локальная поза камеры при attach (за спиной, чуть сверху)
const ATTACHED_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 6.0);
const ATTACHED_EULER: Vec3 = Vec3::new(-20.0, 0.0, 0.0);

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (teleport_on_key, toggle_camera_attachment).before(GameplaySet::Input),
        );
    }
}

fn teleport_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    players: Query<Entity, With<Player>>,
    mut teleports: EventWriter<TeleportIntent>,
) {
    if !keys.just_pressed(KeyCode::KeyT) {
        return;
    }

    for player in players.iter() {
        teleports.write(TeleportIntent::new(player, PLAYER_SPAWN));
    }
}

fn toggle_camera_attachment(
    keys: Res<ButtonInput<KeyCode>>,
    registry: Res<CameraRegistry>,
    cameras: Query<&CameraFollow>,
    players: Query<Entity, With<Player>>,
    mut attach: EventWriter<AttachCamera>,
    mut detach: EventWriter<DetachCamera>,
) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }

    let Some(follow) = registry.main.and_then(|camera| cameras.get(camera).ok()) else {
        return;
    };

    if follow.is_parented() {
        detach.write(DetachCamera {
            camera: None,
            preserve_world_pose: true,
        });
        return;
    }

    if let Some(player) = players.iter().next() {
        attach.write(AttachCamera {
            camera: None,
            parent: player,
            local_offset: ATTACHED_OFFSET,
            local_euler: ATTACHED_EULER,
        });
    }
}
