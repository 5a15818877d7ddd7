//! TRAILCAM Simulation Core
//!
//! Headless gameplay слой на Bevy 0.16: locomotion игрока + follow камера.
//!
//! Разделение:
//! - simulation (этот crate) = вся gameplay логика, без рендера и без device polling
//! - client = polling устройств → PlayerInputFrame, Camera3d на MainCamera, сцена
//!
//! Per-frame порядок (Update): Input → Locomotion → Camera.
//! Physics tick (FixedUpdate 60Hz): velocity → rapier body.

use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod input;
pub mod logger;
pub mod player;

pub use camera::{
    ensure_main_camera, AttachCamera, AxisLock, CameraFollow, CameraFollowPlugin, CameraHeading, CameraRegistry,
    DetachCamera, MainCamera, SetCameraTarget,
};
pub use config::{CameraTunables, ConfigError, InputTunables, PlayerTunables, Tunables};
pub use input::{map_move_input, DirectionalKeys, InputSources, PlayerInputFrame};
pub use logger::{log, log_error, log_info, log_warning};
pub use player::{spawn_player, Locomotion, LocomotionMode, Player, PlayerPlugin, TeleportIntent};

/// Фазы visual frame (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Input mapping, manual yaw, camera commands, heading
    Input,
    /// Teleport, velocity, kinematic движение, ориентация
    Locomotion,
    /// Follow камера (после того как target сдвинулся)
    Camera,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub tunables: Tunables,
}

impl SimulationPlugin {
    pub fn with_tunables(tunables: Tunables) -> Self {
        Self { tunables }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        logger::init_logger();

        app
            // Fixed timestep 60Hz для physics tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .insert_resource(self.tunables.clone())
            .init_resource::<PlayerInputFrame>()
            .configure_sets(
                Update,
                (GameplaySet::Input, GameplaySet::Locomotion, GameplaySet::Camera).chain(),
            )
            .add_plugins((PlayerPlugin, CameraFollowPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без rapier step, без рендера)
pub fn create_headless_app(tunables: Tunables) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .add_plugins(SimulationPlugin::with_tunables(tunables));

    app
}
