//! HeadingProvider — yaw main камеры для camera-relative movement

use bevy::prelude::*;

/// Heading main камеры, пересчитывается каждый frame (`update_heading`)
///
/// Нет камеры → identity (input маппится в world axes).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraHeading {
    pub rotation: Quat,
    pub angle_degrees: f32,
}

impl CameraHeading {
    pub fn from_angle(angle_degrees: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_y(angle_degrees.to_radians()),
            angle_degrees,
        }
    }
}

impl Default for CameraHeading {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            angle_degrees: 0.0,
        }
    }
}
