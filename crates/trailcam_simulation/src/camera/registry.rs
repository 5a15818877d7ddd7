//! Main camera registry + `ensure_main_camera`
//!
//! Вместо глобального поиска по тегу: `CameraRegistry` resource хранит main camera entity,
//! `MainCamera` marker отмечает её в мире. Render слой (client) вешает Camera3d на
//! каждую новую `MainCamera`.

use bevy::prelude::*;

use super::follow::CameraFollow;
use crate::config::Tunables;
use crate::logger;

/// Marker: primary render camera
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraRegistry {
    pub main: Option<Entity>,
}

impl CameraRegistry {
    /// Явная камера из event или main camera
    pub fn resolve(&self, explicit: Option<Entity>) -> Option<Entity> {
        explicit.or(self.main)
    }
}

/// Найти или создать ровно одну main camera + CameraFollow, привязать к `target`
///
/// Идемпотентно: повторный вызов переиспользует ту же камеру и только обновляет target/offset.
/// `None` target → warning и `None`.
pub fn ensure_main_camera(world: &mut World, target: Option<Entity>, offset: Vec3) -> Option<Entity> {
    let Some(target) = target else {
        logger::log_warning("ensure_main_camera: target is None, camera not created");
        return None;
    };

    let registered = world
        .get_resource::<CameraRegistry>()
        .and_then(|registry| registry.main)
        .filter(|camera| world.entities().contains(*camera));

    let tagged = match registered {
        Some(camera) => Some(camera),
        None => {
            let mut cameras = world.query_filtered::<Entity, With<MainCamera>>();
            cameras.iter(world).next()
        }
    };

    let camera = match tagged {
        Some(camera) => camera,
        None => {
            let camera = world
                .spawn((Name::new("MainCamera"), MainCamera, Transform::default()))
                .id();
            logger::log_info(&format!("Main camera spawned: {:?}", camera));
            camera
        }
    };

    let tunables = world
        .get_resource::<Tunables>()
        .map(|tunables| tunables.camera)
        .unwrap_or_default();

    let mut entity = world.entity_mut(camera);
    if !entity.contains::<CameraFollow>() {
        entity.insert(CameraFollow::from_tunables(&tunables));
    }
    entity.insert(MainCamera);

    if let Some(mut follow) = entity.get_mut::<CameraFollow>() {
        follow.target = Some(target);
        follow.offset = offset;
    }

    world.get_resource_or_insert_with(CameraRegistry::default).main = Some(camera);

    Some(camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_target_returns_none() {
        let mut world = World::new();
        assert_eq!(ensure_main_camera(&mut world, None, Vec3::ZERO), None);
        assert!(world.get_resource::<CameraRegistry>().is_none());
    }

    #[test]
    fn test_idempotent_single_camera() {
        let mut world = World::new();
        let player = world.spawn(Transform::default()).id();
        let other = world.spawn(Transform::default()).id();

        let first = ensure_main_camera(&mut world, Some(player), Vec3::new(0.0, 15.0, 0.0));
        let second = ensure_main_camera(&mut world, Some(other), Vec3::new(0.0, 8.0, 2.0));

        assert!(first.is_some());
        assert_eq!(first, second);

        let mut cameras = world.query_filtered::<Entity, With<MainCamera>>();
        assert_eq!(cameras.iter(&world).count(), 1);

        let follow = world.get::<CameraFollow>(first.unwrap()).expect("follow attached");
        assert_eq!(follow.target, Some(other));
        assert_eq!(follow.offset, Vec3::new(0.0, 8.0, 2.0));
        assert_eq!(world.resource::<CameraRegistry>().main, first);
    }

    #[test]
    fn test_adopts_existing_tagged_camera() {
        let mut world = World::new();
        let player = world.spawn(Transform::default()).id();
        let existing = world.spawn((MainCamera, Transform::default())).id();

        let camera = ensure_main_camera(&mut world, Some(player), Vec3::Y);

        assert_eq!(camera, Some(existing));
        assert!(world.get::<CameraFollow>(existing).is_some());
    }

    #[test]
    fn test_adopted_camera_without_transform_gets_one() {
        let mut world = World::new();
        let player = world.spawn(Transform::default()).id();
        let bare = world.spawn(MainCamera).id();

        let camera = ensure_main_camera(&mut world, Some(player), Vec3::Y);

        // Без Transform camera_follow query её бы не видел
        assert_eq!(camera, Some(bare));
        assert!(world.entity(bare).contains::<Transform>());
        assert!(world.entity(bare).contains::<GlobalTransform>());
    }

    #[test]
    fn test_stale_registry_entry_is_replaced() {
        let mut world = World::new();
        let player = world.spawn(Transform::default()).id();

        let first = ensure_main_camera(&mut world, Some(player), Vec3::Y).unwrap();
        world.despawn(first);

        let second = ensure_main_camera(&mut world, Some(player), Vec3::Y).unwrap();
        assert_ne!(first, second);
        assert_eq!(world.resource::<CameraRegistry>().main, Some(second));
    }
}
