use bevy::prelude::*;
use bevy_rapier3d::plugin::TimestepMode;
use bevy_rapier3d::prelude::*;
use trailcam_simulation::{
    ensure_main_camera, log_warning, spawn_player, LocomotionMode, SimulationPlugin, Tunables,
};

mod controls;
mod input;
mod rendering;

use controls::ControlsPlugin;
use input::InputPollingPlugin;
use rendering::RenderingSyncPlugin;

/// Точка спавна игрока (центр капсулы над землёй)
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.9, 0.0);

/// Rapier step 60Hz с интерполяцией: только в этом режиме rapier читает `TransformInterpolation`
/// игрока, и рендер на любом frame rate не дёргается шагами физики.
fn physics_timestep() -> TimestepMode {
    TimestepMode::Interpolated {
        dt: 1.0 / 60.0,
        time_scale: 1.0,
        substeps: 1,
    }
}

fn main() {
    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "TRAILCAM - Player + Follow Camera".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics: rapier сам аккумулирует время (Interpolated), Velocity пишется в FixedUpdate
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(physics_timestep())
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin::with_tunables(Tunables::default()))
        // Devices → PlayerInputFrame
        .add_plugins(InputPollingPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Debug keys: teleport / attach camera
        .add_plugins(ControlsPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Spawn ground, lights, physics-driven игрок и main camera
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tunables: Res<Tunables>,
) {
    // Ground plane (60x60m) + static collider
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(30.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(30.0, 0.1, 30.0),
    ));

    // Ориентиры, чтобы было видно движение камеры
    for (index, position) in [Vec3::new(8.0, 0.5, -8.0), Vec3::new(-12.0, 0.5, 4.0), Vec3::new(5.0, 0.5, 14.0)]
        .into_iter()
        .enumerate()
    {
        commands.spawn((
            Name::new(format!("Marker {}", index)),
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.7, 0.6, 0.4))),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(0.5, 0.5, 0.5),
        ));
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    let player = spawn_player(&mut commands, PLAYER_SPAWN, LocomotionMode::PhysicsDriven, &tunables.player);

    // Камера создаётся через registry (нужен &mut World)
    let offset = tunables.camera.offset;
    commands.queue(move |world: &mut World| {
        if ensure_main_camera(world, Some(player), offset).is_none() {
            log_warning("Main camera was not created");
        }
    });
}
