//! Headless симуляция TRAILCAM
//!
//! Kinematic игрок + main camera, scripted input: вперёд, free-look поворот, телепорт,
//! переключение камеры на маяк и обратно.
//! Опционально первый аргумент — путь к JSON с tunables.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use trailcam_simulation::{
    create_headless_app, ensure_main_camera, log_error, log_info, spawn_player, CameraFollow, DirectionalKeys,
    Locomotion, LocomotionMode, PlayerInputFrame, SetCameraTarget, TeleportIntent, Tunables,
};

const TICKS: usize = 600;

fn load_tunables() -> Tunables {
    let Some(path) = std::env::args().nth(1) else {
        return Tunables::default();
    };

    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| Tunables::from_json_str(&json).map_err(|err| err.to_string()));

    match parsed {
        Ok(tunables) => tunables,
        Err(err) => {
            log_error(&format!("Tunables {}: {}, using defaults", path, err));
            Tunables::default()
        }
    }
}

fn main() {
    let tunables = load_tunables();
    let mut app = create_headless_app(tunables.clone());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)));

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, Vec3::ZERO, LocomotionMode::Kinematic, &tunables.player)
    };
    app.world_mut().flush();

    let beacon = app
        .world_mut()
        .spawn((Name::new("Beacon"), Transform::from_xyz(-30.0, 0.0, 10.0)))
        .id();

    let offset = tunables.camera.offset;
    let Some(camera) = ensure_main_camera(app.world_mut(), Some(player), offset) else {
        log_error("Main camera not created");
        return;
    };

    log_info(&format!("Starting TRAILCAM headless simulation ({} ticks)", TICKS));

    for tick in 0..TICKS {
        {
            let mut frame = app.world_mut().resource_mut::<PlayerInputFrame>();
            frame.clear_deltas();
            frame.sources.keys = DirectionalKeys {
                forward: tick < 300,
                right: (200..300).contains(&tick),
                ..default()
            };
            frame.free_look_held = (100..160).contains(&tick);
            if frame.free_look_held {
                frame.pointer_delta.x = 6.0;
            }
        }

        match tick {
            450 => {
                app.world_mut().send_event(TeleportIntent::new(player, Vec3::new(40.0, 0.0, 40.0)));
            }
            520 => {
                app.world_mut().send_event(SetCameraTarget::main(beacon));
            }
            570 => {
                app.world_mut().send_event(SetCameraTarget::main(player));
            }
            _ => {}
        }

        app.update();

        if tick % 100 == 0 || matches!(tick, 451 | 521 | 571) {
            let world = app.world();
            let (Some(player_transform), Some(locomotion)) =
                (world.get::<Transform>(player), world.get::<Locomotion>(player))
            else {
                continue;
            };
            let (Some(camera_transform), Some(follow)) =
                (world.get::<Transform>(camera), world.get::<CameraFollow>(camera))
            else {
                continue;
            };

            log_info(&format!(
                "Tick {}: player {:.2?} v={:.2?} | camera {:.2?} yaw={:.1}°",
                tick,
                player_transform.translation,
                locomotion.current_velocity(),
                camera_transform.translation,
                follow.yaw.offset_degrees(),
            ));
        }
    }

    log_info("Simulation complete!");
}
