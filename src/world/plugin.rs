//! Arena bootstrap - floor, lighting, and the opening enemy ring.

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::data::EnemyRegistry;
use crate::enemies::spawn_enemy;

const ARENA_SIZE: f32 = 40.0;
const SPAWN_RING_RADIUS: f32 = 12.0;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), (setup_arena, spawn_initial_enemies));
    }
}

fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.6, 0.7),
        brightness: 120.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_SIZE, ARENA_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.22, 0.2),
            perceptual_roughness: 0.95,
            ..default()
        })),
    ));
}

/// Spawn one of each registered enemy kind, spread evenly on a ring
/// around the player start.
fn spawn_initial_enemies(mut commands: Commands, registry: Res<EnemyRegistry>) {
    if registry.definitions.is_empty() {
        warn!("no enemy definitions loaded, arena will be empty");
        return;
    }

    let count = registry.definitions.len();
    let mut kinds: Vec<_> = registry.definitions.keys().cloned().collect();
    kinds.sort();

    for (i, kind) in kinds.iter().enumerate() {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let position = Vec3::new(
            angle.cos() * SPAWN_RING_RADIUS,
            0.0,
            angle.sin() * SPAWN_RING_RADIUS,
        );
        if let Some(definition) = registry.definitions.get(kind) {
            spawn_enemy(&mut commands, definition, kind, position);
        }
    }
}
