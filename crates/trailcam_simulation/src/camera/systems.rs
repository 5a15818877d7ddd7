//! Camera systems (ECS)
//!
//! # GameplaySet::Input
//! - `accumulate_manual_yaw` — free-look pointer delta → ManualYaw
//! - `apply_camera_commands` — SetCameraTarget / AttachCamera / DetachCamera
//! - `update_heading` — CameraHeading resource для locomotion
//!
//! # GameplaySet::Camera (после locomotion)
//! - `camera_follow` — Free: smoothing/snap; Parented: переприменить local позу

use std::collections::HashSet;

use bevy::prelude::*;

use super::events::{AttachCamera, DetachCamera, SetCameraTarget};
use super::follow::CameraFollow;
use super::heading::CameraHeading;
use super::registry::{CameraRegistry, MainCamera};
use crate::input::PlayerInputFrame;
use crate::logger;

/// Targets — не камеры (камера не может следить за камерой)
type TargetQuery<'w, 's> = Query<'w, 's, &'static Transform, Without<CameraFollow>>;

pub fn accumulate_manual_yaw(frame: Res<PlayerInputFrame>, mut cameras: Query<&mut CameraFollow, With<MainCamera>>) {
    if !frame.free_look_held || frame.pointer_delta.x == 0.0 {
        return;
    }

    for mut follow in cameras.iter_mut() {
        follow.yaw.accumulate(frame.free_look_held, frame.pointer_delta.x);
    }
}

pub fn apply_camera_commands(
    mut set_target_events: EventReader<SetCameraTarget>,
    mut attach_events: EventReader<AttachCamera>,
    mut detach_events: EventReader<DetachCamera>,
    registry: Res<CameraRegistry>,
    mut cameras: Query<(&mut CameraFollow, &mut Transform, Option<&GlobalTransform>)>,
    targets: TargetQuery,
    mut commands: Commands,
) {
    for event in set_target_events.read() {
        let Some(camera) = registry.resolve(event.camera) else {
            logger::log_warning("SetCameraTarget: no camera registered, ignored");
            continue;
        };
        let Ok((mut follow, mut transform, _)) = cameras.get_mut(camera) else {
            logger::log_warning(&format!("SetCameraTarget: {:?} is not a follow camera", camera));
            continue;
        };

        follow.set_target(event.target, event.custom_offset);

        if !event.snap_immediately {
            continue;
        }

        match event.target.and_then(|target| targets.get(target).ok()) {
            Some(target_transform) if !follow.is_parented() => {
                follow.snap_to_target(target_transform.translation, &mut transform);
            }
            Some(_) => {}
            // Target пока не резолвится → snap на первом успешном update
            None => follow.request_snap(),
        }
    }

    for event in attach_events.read() {
        let Some(camera) = registry.resolve(event.camera) else {
            logger::log_warning("AttachCamera: no camera registered, ignored");
            continue;
        };
        if targets.get(event.parent).is_err() {
            logger::log_warning(&format!("AttachCamera: parent {:?} not found, ignored", event.parent));
            continue;
        }
        let Ok((mut follow, _, _)) = cameras.get_mut(camera) else {
            logger::log_warning(&format!("AttachCamera: {:?} is not a follow camera", camera));
            continue;
        };

        follow.attach_to_parent(event.parent, event.local_offset, event.local_euler);
        commands.entity(event.parent).add_child(camera);
        logger::log(&format!("Camera {:?} attached to {:?}", camera, event.parent));
    }

    for event in detach_events.read() {
        let Some(camera) = registry.resolve(event.camera) else {
            logger::log_warning("DetachCamera: no camera registered, ignored");
            continue;
        };
        let Ok((mut follow, mut transform, global)) = cameras.get_mut(camera) else {
            logger::log_warning(&format!("DetachCamera: {:?} is not a follow camera", camera));
            continue;
        };
        if !follow.is_parented() {
            continue;
        }

        if event.preserve_world_pose {
            if let Some(global) = global {
                *transform = global.compute_transform();
            }
        }

        follow.detach_from_parent(event.preserve_world_pose);
        commands.entity(camera).remove::<ChildOf>();
        logger::log(&format!("Camera {:?} detached", camera));
    }
}

pub fn update_heading(
    registry: Res<CameraRegistry>,
    cameras: Query<(&CameraFollow, &Transform, Option<&GlobalTransform>)>,
    mut heading: ResMut<CameraHeading>,
) {
    let Some((follow, transform, global)) = registry.main.and_then(|camera| cameras.get(camera).ok()) else {
        *heading = CameraHeading::default();
        return;
    };

    // Parented → local поза не равна world, берём GlobalTransform
    let rotation = match (follow.is_parented(), global) {
        (true, Some(global)) => global.compute_transform().rotation,
        _ => transform.rotation,
    };

    *heading = CameraHeading::from_angle(follow.heading_angle(rotation));
}

pub fn camera_follow(
    time: Res<Time>,
    mut cameras: Query<(Entity, &mut CameraFollow, &mut Transform, Option<&ChildOf>)>,
    targets: TargetQuery,
    mut missing_reported: Local<HashSet<Entity>>,
    mut commands: Commands,
) {
    let delta = time.delta_secs();

    for (camera, mut follow, mut transform, child_of) in cameras.iter_mut() {
        if let Some((parent, local)) = follow.parented_local_pose() {
            if targets.get(parent).is_err() {
                logger::log_warning(&format!("Camera {:?}: parent {:?} gone, detaching", camera, parent));
                follow.detach_from_parent(false);
                commands.entity(camera).remove::<ChildOf>();
                continue;
            }

            // Кто-то перепарентил ноду → вернуть на место
            if child_of.map(|link| link.parent()) != Some(parent) {
                commands.entity(parent).add_child(camera);
            }
            if *transform != local {
                *transform = local;
            }
            continue;
        }

        let Some(target_transform) = follow.target.and_then(|target| targets.get(target).ok()) else {
            // Warning один раз на камеру, пока target не вернётся
            if missing_reported.insert(camera) {
                logger::log_warning(&format!("Camera {:?}: target {:?} not found", camera, follow.target));
            }
            continue;
        };
        missing_reported.remove(&camera);

        // Free режим, но нода висит под чужим parent → отцепить (world-space follow)
        if child_of.is_some() {
            commands.entity(camera).remove::<ChildOf>();
        }

        follow.follow(target_transform.translation, &mut transform, delta);
    }
}
