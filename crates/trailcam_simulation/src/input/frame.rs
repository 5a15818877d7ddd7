//! PlayerInputFrame — snapshot device input одного visual frame
//!
//! Host (client) перезаписывает resource каждый frame ДО `GameplaySet::Input`.
//! Headless тесты пишут его напрямую (mock input).

use bevy::prelude::*;

use super::mapper::InputSources;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerInputFrame {
    /// Movement sources (analog sticks + directional keys)
    pub sources: InputSources,
    /// Free-look trigger зажат (например RMB)
    pub free_look_held: bool,
    /// Pointer delta за frame (pixels)
    pub pointer_delta: Vec2,
}

impl PlayerInputFrame {
    /// Сбросить per-frame deltas (клавиши/стики host перезапишет сам)
    pub fn clear_deltas(&mut self) {
        self.pointer_delta = Vec2::ZERO;
    }
}
