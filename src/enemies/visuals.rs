//! Enemy presentation - placeholder bodies, models, and animation playback.
//!
//! The simulation never waits on any of this: an enemy whose model fails to
//! load keeps its colored placeholder body forever and still fights. Clip
//! playback mirrors the entity's `AnimationDriver`; the driver is the timing
//! source of truth and this module only keeps the `AnimationPlayer` in step.

use bevy::animation::{AnimationClip, AnimationPlayer, RepeatAnimation};
use bevy::animation::graph::AnimationNodeIndex;
use bevy::prelude::*;
use bevy::scene::SceneRoot;
use std::collections::HashMap;

use super::components::*;
use super::data::{AnimationIndices, EnemyRegistry};
use crate::animation::AnimationDriver;

/// Marker for enemies awaiting AnimationPlayer discovery.
#[derive(Component)]
pub struct NeedsAnimationSetup;

/// Links an enemy entity to its child AnimationPlayer entity.
#[derive(Component)]
pub struct AnimationLink(pub Entity);

/// Animation graph nodes for an enemy, keyed by clip name.
///
/// The graph asset itself is kept alive by the `AnimationGraphHandle` on the
/// player entity.
#[derive(Component)]
pub struct EnemyAnimationNodes {
    nodes: HashMap<&'static str, AnimationNodeIndex>,
}

impl EnemyAnimationNodes {
    pub fn node(&self, clip: &str) -> Option<AnimationNodeIndex> {
        self.nodes.get(clip).copied()
    }
}

/// Driver generation last applied to the AnimationPlayer.
#[derive(Component, Default)]
pub struct LastSyncedClip(pub u32);

/// Attach placeholder body and model scene to newly spawned enemies.
pub fn attach_enemy_visuals(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<EnemyRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(Entity, &EnemyKind), Added<Enemy>>,
) {
    for (entity, kind) in query.iter() {
        let Some(definition) = registry.get(&kind.0) else {
            warn!("No definition found for enemy kind: {}", kind.0);
            continue;
        };

        let body_material = materials.add(StandardMaterial {
            base_color: Color::srgb(
                definition.color.0,
                definition.color.1,
                definition.color.2,
            ),
            perceptual_roughness: 0.9,
            ..default()
        });
        let body_mesh = meshes.add(Capsule3d::new(definition.radius, definition.radius * 2.5));
        let body_height = definition.radius * 2.0;

        let model_path = definition.model_path.clone();
        let scale = definition.scale;

        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                Mesh3d(body_mesh),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, body_height, 0.0),
            ));

            if !model_path.is_empty() {
                parent.spawn((
                    SceneRoot(asset_server.load(&model_path)),
                    Transform::from_scale(Vec3::splat(scale)),
                ));
            }
        });

        if definition.indices.is_some() {
            commands.entity(entity).insert(NeedsAnimationSetup);
        }
    }
}

/// Finds the AnimationPlayer in the scene hierarchy and builds the graph.
///
/// Runs repeatedly until the glTF scene has been instantiated; enemies whose
/// model never arrives simply keep the marker and their placeholder body.
pub fn setup_enemy_animations(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<EnemyRegistry>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    enemy_query: Query<(Entity, &EnemyKind, &Children), (With<NeedsAnimationSetup>, With<Enemy>)>,
    children_query: Query<&Children>,
    animation_player_query: Query<Entity, With<AnimationPlayer>>,
) {
    for (enemy_entity, kind, children) in enemy_query.iter() {
        let Some(player_entity) =
            find_animation_player_entity(children, &children_query, &animation_player_query)
        else {
            continue;
        };

        let Some(definition) = registry.get(&kind.0) else {
            commands.entity(enemy_entity).remove::<NeedsAnimationSetup>();
            continue;
        };
        let Some(indices) = definition.indices else {
            commands.entity(enemy_entity).remove::<NeedsAnimationSetup>();
            continue;
        };

        let model_base = definition.model_path.replace("#Scene0", "");
        let (graph, nodes) = build_animation_graph(&asset_server, &model_base, indices);
        let graph_handle = graphs.add(graph);

        commands
            .entity(player_entity)
            .insert(AnimationGraphHandle(graph_handle));

        commands
            .entity(enemy_entity)
            .remove::<NeedsAnimationSetup>()
            .insert((
                AnimationLink(player_entity),
                EnemyAnimationNodes { nodes },
                LastSyncedClip::default(),
            ));

        info!("Animation setup complete for enemy: {}", definition.name);
    }
}

/// Recursively search for an AnimationPlayer entity in the hierarchy.
fn find_animation_player_entity(
    children: &Children,
    children_query: &Query<&Children>,
    animation_player_query: &Query<Entity, With<AnimationPlayer>>,
) -> Option<Entity> {
    for &child in children.iter() {
        if animation_player_query.get(child).is_ok() {
            return Some(child);
        }

        if let Ok(grandchildren) = children_query.get(child) {
            if let Some(found) =
                find_animation_player_entity(grandchildren, children_query, animation_player_query)
            {
                return Some(found);
            }
        }
    }
    None
}

/// Build an animation graph with one node per clip.
fn build_animation_graph(
    asset_server: &AssetServer,
    model_base: &str,
    indices: AnimationIndices,
) -> (AnimationGraph, HashMap<&'static str, AnimationNodeIndex>) {
    let mut graph = AnimationGraph::new();
    let mut nodes = HashMap::new();

    let clip_indices = [
        (CLIP_IDLE, indices.idle),
        (CLIP_RUN, indices.run),
        (CLIP_ATTACK_A, indices.attack_a),
        (CLIP_ATTACK_B, indices.attack_b),
        (CLIP_HIT, indices.hit),
        (CLIP_DEATH, indices.death),
    ];

    for (name, index) in clip_indices {
        let clip: Handle<AnimationClip> =
            asset_server.load(format!("{model_base}#Animation{index}"));
        let node = graph.add_clip(clip, 1.0, graph.root);
        nodes.insert(name, node);
    }

    (graph, nodes)
}

/// Mirror the AnimationDriver onto the AnimationPlayer.
pub fn sync_clip_playback(
    mut enemy_query: Query<(
        &AnimationDriver,
        &mut LastSyncedClip,
        &AnimationLink,
        &EnemyAnimationNodes,
    )>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for (driver, mut last_synced, link, nodes) in enemy_query.iter_mut() {
        if last_synced.0 == driver.generation {
            continue;
        }
        last_synced.0 = driver.generation;

        let Ok(mut player) = players.get_mut(link.0) else {
            continue;
        };

        player.stop_all();
        let Some(clip) = driver.current() else {
            continue;
        };
        let Some(node) = nodes.node(&clip.name) else {
            continue;
        };

        let animation = player.start(node);
        animation.set_speed(clip.speed);
        animation.set_repeat(if clip.looping {
            RepeatAnimation::Forever
        } else {
            RepeatAnimation::Never
        });
    }
}
