use bevy::prelude::*;
use trailcam_simulation::{Locomotion, MainCamera, Player};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, attach_render_camera).add_systems(
            PostUpdate,
            (
                spawn_visuals_for_new_players,
                sync_transforms,
                draw_velocity_gizmos,
                despawn_orphan_visuals,
            )
                .chain()
                .after(bevy::transform::TransformSystem::TransformPropagate),
        );
    }
}

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Simulation создаёт MainCamera без render компонентов (headless) → добавляем Camera3d
fn attach_render_camera(mut commands: Commands, cameras: Query<Entity, Added<MainCamera>>) {
    for camera in cameras.iter() {
        commands.entity(camera).insert(Camera3d::default());
    }
}

/// Spawn visual representation (capsule mesh) для новых игроков
fn spawn_visuals_for_new_players(
    mut commands: Commands,
    query: Query<(Entity, &GlobalTransform), (With<Player>, Without<HasVisual>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform) in query.iter() {
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.4, 0.9),
                    ..default()
                })),
                sim_transform.compute_transform(),
                VisualOf(sim_entity),
            ))
            .id();

        // Нос капсулы → видно куда смотрит игрок (-Z)
        let nose = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 0.4))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.2))),
                Transform::from_xyz(0.0, 0.3, -0.45),
            ))
            .id();

        commands.entity(visual_entity).add_child(nose);
        commands.entity(sim_entity).insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
///
/// GlobalTransform: камера может быть child игрока, но сам игрок — root.
fn sync_transforms(
    sim_query: Query<(&GlobalTransform, &HasVisual), Changed<GlobalTransform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = sim_transform.compute_transform();
        }
    }
}

/// Debug: current velocity (жёлтая) и target velocity (голубая)
fn draw_velocity_gizmos(players: Query<(&GlobalTransform, &Locomotion), With<Player>>, mut gizmos: Gizmos) {
    for (transform, locomotion) in players.iter() {
        let origin = transform.translation() + Vec3::Y * 0.1;

        if locomotion.current_velocity().length_squared() > 1e-4 {
            gizmos.arrow(origin, origin + locomotion.current_velocity() * 0.5, Color::srgb(0.9, 0.8, 0.2));
        }
        if locomotion.target_velocity().length_squared() > 1e-4 {
            gizmos.arrow(origin, origin + locomotion.target_velocity() * 0.5, Color::srgb(0.2, 0.8, 0.9));
        }
    }
}

/// Simulation entity исчез → удалить visual
fn despawn_orphan_visuals(
    mut commands: Commands,
    visuals: Query<(Entity, &VisualOf)>,
    players: Query<(), With<Player>>,
) {
    for (visual, owner) in visuals.iter() {
        if players.get(owner.0).is_err() {
            commands.entity(visual).despawn(); // Bevy 0.16: despawn() is recursive by default
        }
    }
}
