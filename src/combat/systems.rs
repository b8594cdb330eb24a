//! Combat resolution - the per-tick loop that turns overlaps into damage.

use bevy::prelude::*;
use std::collections::HashSet;
use std::path::Path;

use super::components::*;
use crate::collision::{volumes_overlap, AttackVolume, Hurtbox};
use crate::core::{DamageEvent, DeathEvent, GameState};
use crate::enemies::data::read_ron;
use crate::enemies::{Enemy, EnemyStats};
use crate::player::Player;

/// Replace the default combat config with `assets/data/combat.ron`, if present.
pub fn load_combat_config(mut config: ResMut<CombatConfig>) {
    let path = Path::new("assets/data/combat.ron");
    if !path.exists() {
        info!("No combat config file; using built-in defaults");
        return;
    }

    match read_ron::<CombatConfig>(path) {
        Ok(loaded) => {
            *config = loaded;
            info!("Loaded combat config from {:?}", path);
        }
        Err(e) => error!("Failed to load combat config: {e}"),
    }
}

/// Advance the player's swing timer.
pub fn update_player_swing(time: Res<Time>, mut query: Query<&mut PlayerCombat>) {
    for mut combat in query.iter_mut() {
        combat.tick(time.delta_secs());
    }
}

/// Player -> enemy damage.
///
/// Skips entirely unless the swing is in its damage window and the attack
/// volume exists. Each overlapped enemy is gated by its own re-hit timestamp,
/// so one swing can hit several enemies but cannot multi-tick any of them.
pub fn player_strike_enemies(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut recent_hits: ResMut<RecentPlayerHits>,
    mut damage_events: EventWriter<DamageEvent>,
    player_query: Query<(Entity, &Transform, &PlayerCombat, &AttackVolume), With<Player>>,
    enemy_query: Query<(Entity, &Transform, &Hurtbox), (With<Enemy>, Without<Dead>)>,
) {
    let Ok((player_entity, player_transform, combat, attack_volume)) = player_query.get_single()
    else {
        return;
    };

    if !combat.is_attack_active() {
        return;
    }
    let Some(attack_volume) = attack_volume.0 else {
        return;
    };

    let now = time.elapsed_secs();

    for (enemy_entity, enemy_transform, hurtbox) in enemy_query.iter() {
        // Hurtboxes populate after model load; nothing to test yet.
        let Some(hurtbox) = hurtbox.0 else {
            continue;
        };
        if !volumes_overlap(&attack_volume, &hurtbox) {
            continue;
        }

        if let Some(&last_hit) = recent_hits.0.get(&enemy_entity) {
            if now - last_hit < config.player_rehit_cooldown {
                continue;
            }
        }
        recent_hits.0.insert(enemy_entity, now);

        // Push the enemy straight away from the player on the horizontal plane.
        let away = Vec3::new(
            enemy_transform.translation.x - player_transform.translation.x,
            0.0,
            enemy_transform.translation.z - player_transform.translation.z,
        )
        .normalize_or_zero();

        damage_events.send(DamageEvent {
            target: enemy_entity,
            source: player_entity,
            amount: config.player_attack_damage,
            knockback: away * config.knockback_distance,
        });
    }
}

/// Enemy -> player damage.
///
/// Purely range and cooldown based, independent of the enemy's swing window:
/// the window drives sound/visuals, this timer drives actual damage. The
/// timer only ticks down while the enemy is in range.
pub fn enemies_strike_player(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut timers: ResMut<EnemyAttackTimers>,
    mut damage_events: EventWriter<DamageEvent>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Dead>)>,
    enemy_query: Query<(Entity, &Transform, &EnemyStats), (With<Enemy>, Without<Dead>)>,
) {
    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };

    let delta = time.delta_secs();

    for (enemy_entity, enemy_transform, stats) in enemy_query.iter() {
        let horizontal_distance = Vec3::new(
            player_transform.translation.x - enemy_transform.translation.x,
            0.0,
            player_transform.translation.z - enemy_transform.translation.z,
        )
        .length();

        if horizontal_distance > stats.attack_range {
            continue;
        }

        let timer = timers.0.entry(enemy_entity).or_insert(0.0);
        if *timer > 0.0 {
            *timer -= delta;
        }
        if *timer <= 0.0 {
            damage_events.send(DamageEvent {
                target: player_entity,
                source: enemy_entity,
                amount: stats.attack_damage,
                knockback: Vec3::ZERO,
            });
            *timer = if stats.attack_cooldown > 0.0 {
                stats.attack_cooldown
            } else {
                config.enemy_attack_cooldown
            };
        }
    }
}

/// Apply queued damage to health, with knockback displacement.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut death_events: EventWriter<DeathEvent>,
    mut targets: Query<(&mut Health, &mut Transform, Option<&Dead>)>,
) {
    // Track entities that died this frame to avoid duplicate death events.
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, mut transform, dead)) = targets.get_mut(event.target) else {
            continue;
        };
        // Damage while dying is dropped, not queued.
        if dead.is_some() {
            continue;
        }

        health.take_damage(event.amount);

        if event.knockback != Vec3::ZERO {
            transform.translation += Vec3::new(event.knockback.x, 0.0, event.knockback.z);
        }

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// End the run when the player dies.
pub fn check_player_death(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<(), With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Game over.");
            next_state.set(GameState::GameOver);
        }
    }
}
