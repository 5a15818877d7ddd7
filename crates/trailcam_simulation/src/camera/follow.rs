//! CameraFollowModel — follow камера с smoothing, snap, parenting и manual yaw
//!
//! # State machine
//!
//! **Free** (initial):
//! - `desired = target + offset`
//! - первый update после получения target → hard snap (velocity = 0)
//! - дальше: `distance > snap_distance` → hard snap (teleport таргета без отстающей камеры),
//!   иначе smooth_damp за `smooth_time`
//! - axis lock: выбранная ось всегда ровно = desired
//! - ориентация: forced top-down → фиксированная Euler поза (yaw + manual offset),
//!   иначе look-at target (или фиксированная поза при roll lock)
//!
//! **Parented** (`attach_to_parent`):
//! - камера — child parent entity с фиксированной local позой
//! - каждый update поза переприменяется (кто-то мог перепарентить/сдвинуть ноду)
//!
//! snap_distance проверяется на каждом кадре, не только на первом.

use bevy::prelude::*;
use serde::Deserialize;

use super::smoothing::smooth_damp;
use super::yaw::ManualYaw;
use crate::config::CameraTunables;

/// Ось, которая всегда трекает target + offset без сглаживания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Reflect)]
pub enum AxisLock {
    X,
    Y,
    Z,
}

impl AxisLock {
    pub fn apply(self, position: &mut Vec3, desired: Vec3) {
        match self {
            AxisLock::X => position.x = desired.x,
            AxisLock::Y => position.y = desired.y,
            AxisLock::Z => position.z = desired.z,
        }
    }
}

/// Режим привязки камеры
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum CameraAttachment {
    Free,
    Parented {
        parent: Entity,
        local_offset: Vec3,
        /// (pitch, yaw, roll) в градусах; yaw дополняется manual offset
        local_euler: Vec3,
    },
}

/// Euler (pitch, yaw, roll) в градусах → Quat (порядок yaw → pitch → roll)
pub fn euler_degrees_to_quat(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), roll.to_radians())
}

/// Follow камера
///
/// `target` — слабая ссылка: entity может быть деспавнен, тогда update = warning + no-op.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct CameraFollow {
    pub target: Option<Entity>,
    pub offset: Vec3,
    pub smooth_time: f32,
    pub snap_distance: f32,
    pub axis_lock: Option<AxisLock>,
    pub look_at_target: bool,
    pub lock_roll: bool,
    pub force_top_down: bool,
    /// (pitch, yaw, roll) в градусах для фиксированной позы
    pub base_euler: Vec3,
    pub yaw: ManualYaw,

    smoothing_velocity: Vec3,
    has_snapped: bool,
    attachment: CameraAttachment,
}

impl CameraFollow {
    pub fn from_tunables(tunables: &CameraTunables) -> Self {
        Self {
            target: None,
            offset: tunables.offset,
            smooth_time: tunables.smooth_time,
            snap_distance: tunables.snap_distance,
            axis_lock: tunables.axis_lock,
            look_at_target: tunables.look_at_target,
            lock_roll: tunables.lock_roll,
            force_top_down: tunables.force_top_down,
            base_euler: tunables.base_euler,
            yaw: ManualYaw::new(tunables.yaw_sensitivity),
            smoothing_velocity: Vec3::ZERO,
            has_snapped: false,
            attachment: CameraAttachment::Free,
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn smoothing_velocity(&self) -> Vec3 {
        self.smoothing_velocity
    }

    pub fn has_snapped(&self) -> bool {
        self.has_snapped
    }

    pub fn attachment(&self) -> CameraAttachment {
        self.attachment
    }

    pub fn is_parented(&self) -> bool {
        matches!(self.attachment, CameraAttachment::Parented { .. })
    }

    pub fn desired_position(&self, target_position: Vec3) -> Vec3 {
        target_position + self.offset
    }

    /// Фиксированная поза: base Euler с yaw + manual offset
    pub fn fixed_rotation(&self, euler: Vec3) -> Quat {
        euler_degrees_to_quat(euler.x, euler.y + self.yaw.offset_degrees(), euler.z)
    }

    /// Заменить target
    ///
    /// Без snap: `has_snapped` не трогаем → камера плавно переедет к новому target
    /// (или snap'нется по snap_distance). Snap делает вызывающий через `snap_to_target`.
    pub fn set_target(&mut self, target: Option<Entity>, custom_offset: Option<Vec3>) {
        self.target = target;
        if let Some(offset) = custom_offset {
            self.offset = offset;
        }
    }

    /// Следующий update сделает hard snap
    pub fn request_snap(&mut self) {
        self.has_snapped = false;
    }

    /// Hard snap: позиция = desired (с axis lock), velocity = 0, ориентация пересчитана
    pub fn snap_to_target(&mut self, target_position: Vec3, transform: &mut Transform) {
        transform.translation = self.desired_position(target_position);
        self.smoothing_velocity = Vec3::ZERO;
        self.has_snapped = true;
        self.orient(transform, target_position);
    }

    /// Free follow step (Parented режим этот метод не использует)
    pub fn follow(&mut self, target_position: Vec3, transform: &mut Transform, dt: f32) {
        let desired = self.desired_position(target_position);

        if !self.has_snapped || transform.translation.distance(desired) > self.snap_distance {
            self.snap_to_target(target_position, transform);
            return;
        }

        let mut position = smooth_damp(
            transform.translation,
            desired,
            &mut self.smoothing_velocity,
            self.smooth_time,
            dt,
        );

        if let Some(lock) = self.axis_lock {
            lock.apply(&mut position, desired);
        }

        transform.translation = position;
        self.orient(transform, target_position);
    }

    /// Пересчитать ориентацию после позиционирования
    pub fn orient(&self, transform: &mut Transform, target_position: Vec3) {
        if self.force_top_down {
            transform.rotation = self.fixed_rotation(self.base_euler);
            return;
        }

        if !self.look_at_target {
            return;
        }

        if self.lock_roll {
            transform.rotation = self.fixed_rotation(self.base_euler);
        } else if transform.translation.distance_squared(target_position) > f32::EPSILON {
            transform.look_at(target_position, Vec3::Y);
        }
    }

    pub fn attach_to_parent(&mut self, parent: Entity, local_offset: Vec3, local_euler: Vec3) {
        self.attachment = CameraAttachment::Parented {
            parent,
            local_offset,
            local_euler,
        };
    }

    /// Вернуться в Free
    ///
    /// `preserve_world_pose == false` → следующий update сделает hard snap к target.
    pub fn detach_from_parent(&mut self, preserve_world_pose: bool) {
        self.attachment = CameraAttachment::Free;
        self.smoothing_velocity = Vec3::ZERO;
        if !preserve_world_pose {
            self.has_snapped = false;
        }
    }

    /// Local поза в Parented режиме (parent, local transform)
    pub fn parented_local_pose(&self) -> Option<(Entity, Transform)> {
        match self.attachment {
            CameraAttachment::Free => None,
            CameraAttachment::Parented {
                parent,
                local_offset,
                local_euler,
            } => Some((
                parent,
                Transform::from_translation(local_offset).with_rotation(self.fixed_rotation(local_euler)),
            )),
        }
    }

    /// HeadingRotation: yaw-only поворот для маппинга input в world space
    ///
    /// Forced top-down → base yaw + manual offset. Иначе — forward камеры, спроецированный
    /// на XZ; identity если проекция вырождена (камера смотрит почти вертикально).
    pub fn heading_rotation(&self, camera_rotation: Quat) -> Quat {
        Quat::from_rotation_y(self.heading_angle(camera_rotation).to_radians())
    }

    /// Heading yaw в градусах
    pub fn heading_angle(&self, camera_rotation: Quat) -> f32 {
        if self.force_top_down {
            return super::yaw::normalize_degrees(self.base_euler.y + self.yaw.offset_degrees());
        }

        let forward = camera_rotation * Vec3::NEG_Z;
        let projected = Vec3::new(forward.x, 0.0, forward.z);
        if projected.length_squared() < 1e-6 {
            return 0.0;
        }

        // yaw 0 = смотрим в -Z, положительный yaw = против часовой (вид сверху)
        (-projected.x).atan2(-projected.z).to_degrees()
    }
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::from_tunables(&CameraTunables::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn scenario_camera() -> (CameraFollow, Entity) {
        let mut world = World::new();
        let target = world.spawn_empty().id();

        let tunables = CameraTunables {
            offset: Vec3::new(0.0, 15.0, 0.0),
            smooth_time: 0.15,
            snap_distance: 12.0,
            ..default()
        };
        (CameraFollow::from_tunables(&tunables).with_target(target), target)
    }

    #[test]
    fn test_first_update_snaps_exactly() {
        let (mut follow, _) = scenario_camera();
        let mut transform = Transform::from_xyz(100.0, -3.0, 7.0);

        follow.follow(Vec3::new(1.0, 0.0, 2.0), &mut transform, 1.0 / 60.0);

        assert!(transform.translation.abs_diff_eq(Vec3::new(1.0, 15.0, 2.0), EPS));
        assert_eq!(follow.smoothing_velocity(), Vec3::ZERO);
        assert!(follow.has_snapped());
    }

    #[test]
    fn test_small_move_is_smoothed() {
        let (mut follow, _) = scenario_camera();
        let mut transform = Transform::default();
        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        follow.follow(Vec3::new(2.0, 0.0, 0.0), &mut transform, 1.0 / 60.0);

        assert!(transform.translation.x > 0.0 && transform.translation.x < 2.0);
        assert!(follow.smoothing_velocity().x > 0.0);
    }

    #[test]
    fn test_far_move_hard_snaps() {
        // target в origin, offset (0,15,0), smooth 0.15, snap 12 → target уехал на 20
        let (mut follow, _) = scenario_camera();
        let mut transform = Transform::default();
        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);
        follow.follow(Vec3::new(1.0, 0.0, 0.0), &mut transform, 1.0 / 60.0);
        assert_ne!(follow.smoothing_velocity(), Vec3::ZERO);

        follow.follow(Vec3::new(20.0, 0.0, 0.0), &mut transform, 1.0 / 60.0);

        assert_eq!(transform.translation, Vec3::new(20.0, 15.0, 0.0));
        assert_eq!(follow.smoothing_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_axis_lock_tracks_exactly() {
        let (mut follow, _) = scenario_camera();
        follow.axis_lock = Some(AxisLock::X);
        let mut transform = Transform::default();
        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        follow.follow(Vec3::new(3.0, 0.0, 3.0), &mut transform, 1.0 / 60.0);

        assert_eq!(transform.translation.x, 3.0);
        assert!(transform.translation.z < 3.0);
    }

    #[test]
    fn test_top_down_pose_looks_down_with_yaw() {
        let (mut follow, _) = scenario_camera();
        follow.yaw.set_offset_degrees(90.0);
        let mut transform = Transform::default();
        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        let forward = transform.rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Y, EPS), "forward {:?}", forward);

        // Верх экрана = heading forward (yaw 90° → -X)
        let screen_up = transform.rotation * Vec3::Y;
        assert!(screen_up.abs_diff_eq(Vec3::NEG_X, EPS), "up {:?}", screen_up);
    }

    #[test]
    fn test_look_at_target_when_not_top_down() {
        let (mut follow, _) = scenario_camera();
        follow.force_top_down = false;
        follow.offset = Vec3::new(0.0, 5.0, 10.0);
        let mut transform = Transform::default();

        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        let forward = transform.rotation * Vec3::NEG_Z;
        let expected = (Vec3::ZERO - transform.translation).normalize();
        assert!(forward.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_roll_lock_uses_fixed_pose() {
        let (mut follow, _) = scenario_camera();
        follow.force_top_down = false;
        follow.lock_roll = true;
        follow.base_euler = Vec3::new(-60.0, 30.0, 0.0);
        let mut transform = Transform::default();

        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        let expected = euler_degrees_to_quat(-60.0, 30.0, 0.0);
        assert!(transform.rotation.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_heading_in_top_down_mode() {
        let (mut follow, _) = scenario_camera();
        for delta in [10.0, -4.0, 6.0] {
            follow.yaw.accumulate(true, delta);
        }

        assert!((follow.yaw.offset_degrees() - 3.0).abs() < 1e-5);
        assert!((follow.heading_angle(Quat::IDENTITY) - 3.0).abs() < 1e-5);
        let expected = Quat::from_rotation_y(3f32.to_radians());
        assert!(follow.heading_rotation(Quat::IDENTITY).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_heading_from_projected_forward() {
        let (mut follow, _) = scenario_camera();
        follow.force_top_down = false;

        // Камера смотрит вниз под 45° в сторону -X
        let rotation = euler_degrees_to_quat(-45.0, 90.0, 0.0);
        assert!((follow.heading_angle(rotation) - 90.0).abs() < 1e-3);

        // Почти вертикально вниз → вырожденная проекция → identity
        let straight_down = euler_degrees_to_quat(-90.0, 40.0, 0.0);
        assert_eq!(follow.heading_rotation(straight_down), Quat::IDENTITY);
    }

    #[test]
    fn test_parented_pose_includes_manual_yaw() {
        let (mut follow, target) = scenario_camera();
        follow.yaw.set_offset_degrees(-30.0);
        follow.attach_to_parent(target, Vec3::new(0.0, 2.0, 4.0), Vec3::new(-20.0, 10.0, 0.0));

        let (parent, local) = follow.parented_local_pose().expect("parented");
        assert_eq!(parent, target);
        assert_eq!(local.translation, Vec3::new(0.0, 2.0, 4.0));
        assert!(local.rotation.abs_diff_eq(euler_degrees_to_quat(-20.0, -20.0, 0.0), EPS));
    }

    #[test]
    fn test_detach_without_preserve_resnaps() {
        let (mut follow, target) = scenario_camera();
        let mut transform = Transform::default();
        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);

        follow.attach_to_parent(target, Vec3::ZERO, Vec3::ZERO);
        follow.detach_from_parent(false);
        assert!(!follow.has_snapped());
        assert!(follow.parented_local_pose().is_none());

        follow.follow(Vec3::ZERO, &mut transform, 1.0 / 60.0);
        follow.attach_to_parent(target, Vec3::ZERO, Vec3::ZERO);
        follow.detach_from_parent(true);
        assert!(follow.has_snapped());
    }
}
