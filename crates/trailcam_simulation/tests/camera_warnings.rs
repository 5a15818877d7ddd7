//! Missing target warnings
//!
//! Отдельный test binary: логгер глобальный, здесь его никто параллельно не трогает.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use trailcam_simulation::logger::{set_logger, LogLevel, LogPrinter};
use trailcam_simulation::*;

struct CapturePrinter(Arc<Mutex<Vec<(LogLevel, String)>>>);

impl LogPrinter for CapturePrinter {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

fn missing_target_warnings(captured: &Arc<Mutex<Vec<(LogLevel, String)>>>, camera: Entity) -> usize {
    let prefix = format!("Camera {:?}: target", camera);
    captured
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == LogLevel::Warning && message.contains(&prefix))
        .count()
}

#[test]
fn test_missing_target_warning_is_reported_once_per_camera() {
    let mut app = create_headless_app(Tunables::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)));

    let captured = Arc::new(Mutex::new(Vec::new()));
    set_logger(Box::new(CapturePrinter(captured.clone())));

    let tunables = app.world().resource::<Tunables>().clone();
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, Vec3::ZERO, LocomotionMode::Kinematic, &tunables.player)
    };
    app.world_mut().flush();
    let main = ensure_main_camera(app.world_mut(), Some(player), tunables.camera.offset).unwrap();

    // Вторая камера следит за уже удалённым entity, main камера — за живым игроком
    let gone = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().despawn(gone);
    let orphan = app
        .world_mut()
        .spawn(CameraFollow::from_tunables(&tunables.camera).with_target(gone))
        .id();

    for _ in 0..10 {
        app.update();
    }

    assert_eq!(missing_target_warnings(&captured, orphan), 1);
    assert_eq!(missing_target_warnings(&captured, main), 0);

    // Target вернулся → флаг сброшен, повторная потеря снова даёт один warning
    app.world_mut().get_mut::<CameraFollow>(orphan).unwrap().target = Some(player);
    app.update();
    let lost = app.world_mut().spawn_empty().id();
    app.world_mut().get_mut::<CameraFollow>(orphan).unwrap().target = Some(lost);
    for _ in 0..10 {
        app.update();
    }

    assert_eq!(missing_target_warnings(&captured, orphan), 2);
}
