//! Player control marker component
//!
//! Отмечает entity, которым управляет игрок через PlayerInputFrame.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` filter: только этот актор получает
/// movement input из PlayerInputFrame. Остальные акторы с `Locomotion` двигаются
/// тем input, который им пишет кто-то другой (AI, сеть, тесты).
///
/// # Single-player
/// Обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
