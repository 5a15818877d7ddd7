//! Camera domain — follow камера + heading
//!
//! Содержит:
//! - CameraFollow (CameraFollowModel: smoothing, snap, axis lock, parenting, manual yaw)
//! - CameraHeading (HeadingProvider для camera-relative input)
//! - MainCamera / CameraRegistry / ensure_main_camera
//! - SetCameraTarget / AttachCamera / DetachCamera (events)

pub mod events;
pub mod follow;
pub mod heading;
pub mod registry;
pub mod smoothing;
pub mod systems;
pub mod yaw;

pub use events::*;
pub use follow::{euler_degrees_to_quat, AxisLock, CameraAttachment, CameraFollow};
pub use heading::CameraHeading;
pub use registry::{ensure_main_camera, CameraRegistry, MainCamera};
pub use smoothing::smooth_damp;
pub use yaw::{normalize_degrees, ManualYaw};

use bevy::prelude::*;

use crate::GameplaySet;

/// Camera Plugin
///
/// Input set: manual yaw → camera commands → heading (heading нужен locomotion в том же frame).
/// Camera set: follow после locomotion.
pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SetCameraTarget>()
            .add_event::<AttachCamera>()
            .add_event::<DetachCamera>()
            .init_resource::<CameraRegistry>()
            .init_resource::<CameraHeading>()
            .register_type::<CameraFollow>()
            .add_systems(
                Update,
                (
                    systems::accumulate_manual_yaw,
                    systems::apply_camera_commands,
                    systems::update_heading,
                )
                    .chain()
                    .in_set(GameplaySet::Input),
            )
            .add_systems(Update, systems::camera_follow.in_set(GameplaySet::Camera));
    }
}
