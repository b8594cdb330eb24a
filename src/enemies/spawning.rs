//! Enemy spawning and lifecycle bookkeeping.
//!
//! The spawner owns the live-enemy set: it appends on spawn and removes
//! entities only during the Cleanup phase, after their death sequence has
//! finished, so nothing despawns while behavior or combat is iterating.

use bevy::prelude::*;

use super::components::*;
use super::data::EnemyDefinition;
use crate::animation::AnimationDriver;
use crate::collision::Hurtbox;
use crate::combat::{EnemyAttackTimers, Health, RecentPlayerHits};

/// Sent exactly once per enemy, when its death sequence completes.
///
/// The removal system reacts by despawning the entity; other systems may
/// listen for scoring or respawn logic.
#[derive(Event, Debug)]
pub struct EnemyDied {
    pub entity: Entity,
}

/// Live-enemy count, for the spawner's bookkeeping.
#[derive(Resource, Default, Debug)]
pub struct EnemyPopulation {
    pub alive: usize,
}

/// Simulation components for one enemy, from its definition.
///
/// Presentation (placeholder body, model scene, animation graph) attaches
/// separately once assets are available.
pub fn enemy_bundle(
    definition: &EnemyDefinition,
    kind: &str,
    position: Vec3,
) -> impl Bundle {
    let mut driver = AnimationDriver::default();
    driver.play_looping(CLIP_IDLE, definition.clips.idle);

    (
        Enemy,
        EnemyKind(kind.to_string()),
        definition.to_stats(),
        definition.clip_durations(),
        Health::new(definition.max_health),
        EnemyState::default(),
        PreviousState::default(),
        AttackSwing::default(),
        SpawnClock::default(),
        driver,
        definition.hurtbox_shape(),
        Hurtbox::default(),
        Transform::from_translation(position),
        Visibility::default(),
    )
}

/// Spawn an enemy of the given kind at a position.
pub fn spawn_enemy(
    commands: &mut Commands,
    definition: &EnemyDefinition,
    kind: &str,
    position: Vec3,
) -> Entity {
    commands.spawn(enemy_bundle(definition, kind, position)).id()
}

/// Count enemies entering the world.
pub fn track_spawns(
    mut population: ResMut<EnemyPopulation>,
    query: Query<Entity, Added<Enemy>>,
) {
    for entity in query.iter() {
        population.alive += 1;
        info!(
            "Enemy {:?} spawned ({} alive)",
            entity, population.alive
        );
    }
}

/// Despawn enemies whose death sequence has completed.
///
/// Runs in Cleanup, after combat resolution, and also clears the combat
/// loop's per-enemy side tables so stale entries cannot accumulate.
pub fn remove_finished_enemies(
    mut commands: Commands,
    mut population: ResMut<EnemyPopulation>,
    mut recent_hits: ResMut<RecentPlayerHits>,
    mut attack_timers: ResMut<EnemyAttackTimers>,
    query: Query<Entity, (With<Enemy>, With<Removable>)>,
) {
    for entity in query.iter() {
        recent_hits.0.remove(&entity);
        attack_timers.0.remove(&entity);
        population.alive = population.alive.saturating_sub(1);
        info!("Enemy {:?} removed ({} alive)", entity, population.alive);
        commands.entity(entity).despawn_recursive();
    }
}
