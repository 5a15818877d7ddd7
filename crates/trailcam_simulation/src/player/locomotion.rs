//! LocomotionModel — input → velocity с лимитами разгона/торможения
//!
//! Архитектура:
//! - `compute_target_velocity`: planar input, повёрнутый heading камеры, × max speed
//! - `step_velocity`: planar (XZ) часть velocity двигается к target не больше чем на accel·dt
//! - Y компонента НЕ затрагивается damping'ом (падение/прыжок живут своей жизнью)
//!
//! Два режима (выбираются один раз при spawn):
//! - PhysicsDriven: velocity пишется в rapier `Velocity` каждый FixedUpdate, позицию интегрирует rapier
//! - Kinematic: позиция двигается напрямую каждый frame `velocity * dt`

use bevy::prelude::*;
use bevy_rapier3d::prelude::{TransformInterpolation, Velocity};

use crate::config::PlayerTunables;

/// Порог «есть input / есть движение» (len²)
pub const MOVEMENT_EPSILON_SQ: f32 = 1e-4;

/// Planar input (x = right, y = forward) → world velocity
///
/// Forward = -Z (Bevy convention), поэтому input.y идёт в -Z до поворота heading.
pub fn compute_target_velocity(input: Vec2, heading: Quat, max_speed: f32) -> Vec3 {
    let input = input.clamp_length_max(1.0);
    let local = Vec3::new(input.x, 0.0, -input.y);
    let world = heading * local;

    // heading yaw-only, но на всякий случай срезаем вертикаль
    Vec3::new(world.x, 0.0, world.z) * max_speed
}

/// Двигает planar часть `current` к `target` не больше чем на `rate * dt`
///
/// Инвариант: |new - target| ≤ |current - target| (planar), overshoot невозможен.
/// Y берётся из `current` без изменений.
pub fn step_velocity(
    current: Vec3,
    target: Vec3,
    dt: f32,
    acceleration: f32,
    deceleration: f32,
    accelerating: bool,
) -> Vec3 {
    let rate = if accelerating { acceleration } else { deceleration };
    let max_delta = (rate * dt).max(0.0);

    let from = planar(current);
    let delta = planar(target) - from;
    let distance = delta.length();

    let next = if distance <= max_delta || distance <= f32::EPSILON {
        planar(target)
    } else {
        from + delta / distance * max_delta
    };

    Vec3::new(next.x, current.y, next.y)
}

/// XZ проекция (x, z) → Vec2
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Режим движения актора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LocomotionMode {
    /// Rapier rigid body, velocity пишется каждый physics tick
    PhysicsDriven,
    /// Прямая интеграция Transform каждый visual frame
    Kinematic,
}

/// Locomotion state игрока
///
/// `mode` фиксируется в конструкторе и дальше не меняется.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Градусы/сек (OrientationModel)
    pub rotation_speed: f32,
    /// Только Kinematic режим; в PhysicsDriven гравитацию считает rapier
    pub gravity: f32,

    mode: LocomotionMode,
    raw_input: Vec2,
    target_velocity: Vec3,
    velocity: Vec3,
}

impl Locomotion {
    pub fn new(mode: LocomotionMode, tunables: &PlayerTunables) -> Self {
        Self {
            max_speed: tunables.max_speed,
            acceleration: tunables.acceleration,
            deceleration: tunables.deceleration,
            rotation_speed: tunables.rotation_speed,
            gravity: tunables.kinematic_gravity,
            mode,
            raw_input: Vec2::ZERO,
            target_velocity: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    pub fn kinematic(tunables: &PlayerTunables) -> Self {
        Self::new(LocomotionMode::Kinematic, tunables)
    }

    pub fn physics_driven(tunables: &PlayerTunables) -> Self {
        Self::new(LocomotionMode::PhysicsDriven, tunables)
    }

    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    /// Input этого frame (уже после InputMapper, magnitude ≤ 1)
    pub fn raw_move_input(&self) -> Vec2 {
        self.raw_input
    }

    /// Последняя velocity (в PhysicsDriven — зеркало rapier body после physics tick)
    pub fn current_velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn target_velocity(&self) -> Vec3 {
        self.target_velocity
    }

    pub fn set_move_input(&mut self, input: Vec2) {
        self.raw_input = if input.is_finite() {
            input.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        };
    }

    pub fn is_accelerating(&self) -> bool {
        self.raw_input.length_squared() > MOVEMENT_EPSILON_SQ
    }

    /// Пересчитать target velocity из input и heading камеры
    pub fn refresh_target(&mut self, heading: Quat) {
        self.target_velocity = compute_target_velocity(self.raw_input, heading, self.max_speed);
    }

    /// Один шаг velocity от `current` (Y из `current` проходит насквозь)
    pub fn step(&mut self, current: Vec3, dt: f32) -> Vec3 {
        self.velocity = step_velocity(
            current,
            self.target_velocity,
            dt,
            self.acceleration,
            self.deceleration,
            self.is_accelerating(),
        );
        self.velocity
    }

    /// Kinematic frame: velocity step + гравитация + position += velocity * dt
    pub fn advance_kinematic(&mut self, transform: &mut Transform, dt: f32) {
        let mut velocity = self.step(self.velocity, dt);
        velocity.y += self.gravity * dt;
        self.velocity = velocity;

        transform.translation += velocity * dt;
    }

    /// PhysicsDriven tick: Y берём из body (гравитация/прыжок rapier), planar пишем свой
    pub fn drive_body(&mut self, body: &mut Velocity, dt: f32) {
        body.linvel = self.step(body.linvel, dt);
    }

    /// Телепорт в обоих режимах
    ///
    /// `reset_velocity` обнуляет stored velocity, rapier body velocity и interpolation state,
    /// чтобы после телепорта не было дрейфа (и interpolation не тянула визуал из старой точки).
    pub fn teleport(
        &mut self,
        transform: &mut Transform,
        body: Option<&mut Velocity>,
        interpolation: Option<&mut TransformInterpolation>,
        position: Vec3,
        reset_velocity: bool,
    ) {
        transform.translation = position;

        if let Some(interpolation) = interpolation {
            *interpolation = TransformInterpolation::default();
        }

        if !reset_velocity {
            return;
        }

        self.velocity = Vec3::ZERO;
        self.target_velocity = Vec3::ZERO;
        if let Some(body) = body {
            *body = Velocity::zero();
        }
    }
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::kinematic(&PlayerTunables::default())
    }
}
