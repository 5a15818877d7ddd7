//! Camera events (команды для CameraFollow)
//!
//! `camera: None` = main camera из CameraRegistry.

use bevy::prelude::*;

/// Event: заменить target камеры
#[derive(Event, Debug, Clone, Copy)]
pub struct SetCameraTarget {
    pub camera: Option<Entity>,
    pub target: Option<Entity>,
    /// Сразу поставить камеру в target + offset, без сглаживания на этом frame
    pub snap_immediately: bool,
    /// Заменить offset (None = оставить текущий)
    pub custom_offset: Option<Vec3>,
}

impl SetCameraTarget {
    pub fn main(target: Entity) -> Self {
        Self {
            camera: None,
            target: Some(target),
            snap_immediately: true,
            custom_offset: None,
        }
    }
}

/// Event: сделать камеру child `parent` с фиксированной local позой
#[derive(Event, Debug, Clone, Copy)]
pub struct AttachCamera {
    pub camera: Option<Entity>,
    pub parent: Entity,
    pub local_offset: Vec3,
    /// (pitch, yaw, roll) в градусах
    pub local_euler: Vec3,
}

/// Event: вернуть камеру в world-space follow
#[derive(Event, Debug, Clone, Copy)]
pub struct DetachCamera {
    pub camera: Option<Entity>,
    /// Сохранить текущую world позу (иначе следующий update snap'нется к target)
    pub preserve_world_pose: bool,
}
