//! Player events

use bevy::prelude::*;

/// Event: телепортировать актора с `Locomotion`
///
/// Генерируется:
/// - любым другим актором/системой (respawn, порталы, debug key в client)
///
/// Обрабатывается:
/// - `process_teleport_intents` (Update, до locomotion): позиция ставится напрямую в обоих режимах
#[derive(Event, Debug, Clone, Copy)]
pub struct TeleportIntent {
    pub entity: Entity,
    pub position: Vec3,
    /// Обнулить stored + body velocity (иначе актор продолжит движение после телепорта)
    pub reset_velocity: bool,
}

impl TeleportIntent {
    /// Телепорт со сбросом velocity (default поведение)
    pub fn new(entity: Entity, position: Vec3) -> Self {
        Self {
            entity,
            position,
            reset_velocity: true,
        }
    }

    pub fn keep_velocity(mut self) -> Self {
        self.reset_velocity = false;
        self
    }
}
