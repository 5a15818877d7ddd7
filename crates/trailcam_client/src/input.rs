//! Device polling → PlayerInputFrame
//!
//! Simulation не знает про устройства: здесь собираем keyboard / gamepad / mouse в один frame.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use trailcam_simulation::{DirectionalKeys, GameplaySet, PlayerInputFrame};

pub struct InputPollingPlugin;

impl Plugin for InputPollingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, poll_devices.before(GameplaySet::Input));
    }
}

fn poll_devices(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    mut frame: ResMut<PlayerInputFrame>,
) {
    frame.clear_deltas();

    frame.sources.keys = DirectionalKeys {
        forward: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        back: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    };

    // Первый подключённый gamepad: left stick + dpad как второй analog source
    let (stick, dpad) = gamepads
        .iter()
        .next()
        .map(|gamepad| (gamepad.left_stick(), gamepad.dpad()))
        .unwrap_or_default();
    frame.sources.analog = [stick, dpad];

    frame.free_look_held = mouse_buttons.pressed(MouseButton::Right);
    for motion in mouse_motion.read() {
        frame.pointer_delta += motion.delta;
    }
}
