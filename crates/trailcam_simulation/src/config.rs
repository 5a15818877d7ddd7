//! Tunables — фиксированный набор именованных параметров, задаётся при инициализации
//!
//! Defaults совпадают с top-down прототипом (камера на 15m над игроком, snap при 12m).
//! Host может загрузить override из JSON (`Tunables::from_json_str`); отсутствующие поля
//! берутся из Default.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::camera::AxisLock;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tunables parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Все tunables одним resource
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub player: PlayerTunables,
    pub camera: CameraTunables,
    pub input: InputTunables,
}

impl Tunables {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tunables: Tunables = serde_json::from_str(json)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("player.max_speed", self.player.max_speed)?;
        non_negative("player.acceleration", self.player.acceleration)?;
        non_negative("player.deceleration", self.player.deceleration)?;
        non_negative("player.rotation_speed", self.player.rotation_speed)?;
        non_negative("camera.snap_distance", self.camera.snap_distance)?;

        if self.camera.smooth_time.is_nan() || self.camera.smooth_time <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.smooth_time",
                reason: format!("must be > 0, got {}", self.camera.smooth_time),
            });
        }

        if !(0.0..1.0).contains(&self.input.analog_dead_zone) {
            return Err(ConfigError::Invalid {
                field: "input.analog_dead_zone",
                reason: format!("must be in [0, 1), got {}", self.input.analog_dead_zone),
            });
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be finite and >= 0, got {}", value),
        })
    }
}

/// Параметры locomotion игрока
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlayerTunables {
    /// Максимальная планарная скорость (m/s)
    pub max_speed: f32,
    /// Разгон (m/s²), пока есть input
    pub acceleration: f32,
    /// Торможение (m/s²), когда input отпущен
    pub deceleration: f32,
    /// Скорость поворота к velocity (градусы/сек)
    pub rotation_speed: f32,
    /// Гравитация для Kinematic режима (m/s²). 0 = движение только по плоскости
    pub kinematic_gravity: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            acceleration: 40.0,
            deceleration: 50.0,
            rotation_speed: 720.0,
            kinematic_gravity: 0.0,
        }
    }
}

/// Параметры follow камеры
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CameraTunables {
    pub offset: Vec3,
    /// Время сглаживания (сек) для critically damped spring
    pub smooth_time: f32,
    /// Дистанция, после которой камера делает hard snap вместо сглаживания
    pub snap_distance: f32,
    pub axis_lock: Option<AxisLock>,
    pub look_at_target: bool,
    /// Z/roll lock: вместо look-at используется фиксированная поза
    pub lock_roll: bool,
    pub force_top_down: bool,
    /// Base Euler (pitch, yaw, roll) в градусах
    pub base_euler: Vec3,
    /// Градусы yaw на единицу горизонтального pointer delta
    pub yaw_sensitivity: f32,
}

impl Default for CameraTunables {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 15.0, 0.0),
            smooth_time: 0.15,
            snap_distance: 12.0,
            axis_lock: None,
            look_at_target: true,
            lock_roll: false,
            force_top_down: true,
            base_euler: Vec3::new(-90.0, 0.0, 0.0),
            yaw_sensitivity: 0.25,
        }
    }
}

/// Параметры input mapper
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InputTunables {
    /// Analog sources с magnitude ниже порога считаются нулевыми
    pub analog_dead_zone: f32,
}

impl Default for InputTunables {
    fn default() -> Self {
        Self {
            analog_dead_zone: 0.0,
        }
    }
}
