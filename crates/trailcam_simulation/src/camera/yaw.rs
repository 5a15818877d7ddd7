//! Manual yaw — ручной поворот камеры вокруг вертикали
//!
//! Пока зажат free-look trigger, горизонтальный pointer delta × sensitivity копится в offset.
//! Offset всегда в (-180°, 180°], переживает attach/detach и является единственным способом
//! повернуть forced top-down камеру.

use bevy::prelude::*;

/// Нормализовать угол (градусы) в (-180, 180]
pub fn normalize_degrees(angle: f32) -> f32 {
    let normalized = 180.0 - (180.0 - angle).rem_euclid(360.0);

    // rem_euclid может вернуть ровно 360.0 из-за округления
    if normalized <= -180.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ManualYaw {
    /// Градусы на единицу pointer delta
    pub sensitivity: f32,
    offset_degrees: f32,
}

impl ManualYaw {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            offset_degrees: 0.0,
        }
    }

    pub fn offset_degrees(&self) -> f32 {
        self.offset_degrees
    }

    pub fn set_offset_degrees(&mut self, degrees: f32) {
        self.offset_degrees = normalize_degrees(degrees);
    }

    /// Накопить pointer delta (только пока trigger зажат)
    pub fn accumulate(&mut self, free_look_held: bool, pointer_delta_x: f32) {
        if !free_look_held || pointer_delta_x == 0.0 || !pointer_delta_x.is_finite() {
            return;
        }

        self.offset_degrees = normalize_degrees(self.offset_degrees + pointer_delta_x * self.sensitivity);
    }
}

impl Default for ManualYaw {
    fn default() -> Self {
        Self::new(0.25)
    }
}
