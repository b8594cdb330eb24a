//! Enemy behavior state machine.
//!
//! Transitions are driven by horizontal distance to the player and the
//! enemy's own clip timing. The swing damage window (`AttackSwing`) is a
//! plain boolean sampled by presentation and audio; actual damage to the
//! player is gated separately by the combat loop's range-and-cooldown check.

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::*;
use super::spawning::EnemyDied;
use crate::animation::{AnimationDriver, AnimationFinished};
use crate::combat::{Health, ATTACK_WINDOW_END, ATTACK_WINDOW_START};
use crate::core::{DamageEvent, SoundCue};
use crate::player::Player;

/// Source of randomness for the 50/50 attack variant choice.
///
/// Entropy-seeded in production; tests insert a fixed seed.
#[derive(Resource)]
pub struct AttackVariantRng(pub ChaCha8Rng);

impl Default for AttackVariantRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

/// Advance every enemy's spawn clock.
pub fn tick_spawn_clocks(time: Res<Time>, mut query: Query<&mut SpawnClock, With<Enemy>>) {
    for mut clock in query.iter_mut() {
        clock.0.tick(time.delta());
    }
}

/// Turn every living enemy to face the player on the horizontal plane.
pub fn enemy_face_player(
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&mut Transform, &EnemyState), (With<Enemy>, Without<Player>)>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (mut enemy_transform, state) in enemy_query.iter_mut() {
        // The dead don't track their killer.
        if *state == EnemyState::Death {
            continue;
        }

        let look_target = Vec3::new(
            player_transform.translation.x,
            enemy_transform.translation.y,
            player_transform.translation.z,
        );
        if look_target.distance_squared(enemy_transform.translation) < 1e-6 {
            continue;
        }
        enemy_transform.look_at(look_target, Vec3::Y);
    }
}

/// First decision out of Idle, once the spawn delay has elapsed.
pub fn enemy_decide(
    mut rng: ResMut<AttackVariantRng>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            &Transform,
            &EnemyStats,
            &SpawnClock,
            &ClipDurations,
            &mut EnemyState,
            &mut AttackSwing,
            &mut AnimationDriver,
        ),
        With<Enemy>,
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (enemy_transform, stats, clock, clips, mut state, mut swing, mut driver) in
        enemy_query.iter_mut()
    {
        if *state != EnemyState::Idle {
            continue;
        }
        if clock.0.elapsed_secs() < stats.spawn_delay {
            continue;
        }

        let distance = horizontal_distance(
            player_transform.translation,
            enemy_transform.translation,
        );

        if distance <= stats.attack_range {
            begin_attack(&mut rng.0, clips, &mut state, &mut swing, &mut driver);
        } else {
            *state = EnemyState::Chase;
            driver.play_looping(CLIP_RUN, clips.run);
        }
    }
}

/// Close the distance to the player; switch to Attack in range.
pub fn enemy_chase(
    time: Res<Time>,
    mut rng: ResMut<AttackVariantRng>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            &mut Transform,
            &EnemyStats,
            &ClipDurations,
            &mut EnemyState,
            &mut AttackSwing,
            &mut AnimationDriver,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (mut enemy_transform, stats, clips, mut state, mut swing, mut driver) in
        enemy_query.iter_mut()
    {
        if *state != EnemyState::Chase {
            continue;
        }

        // Movement ignores the vertical axis entirely.
        let direction = Vec3::new(
            player_transform.translation.x - enemy_transform.translation.x,
            0.0,
            player_transform.translation.z - enemy_transform.translation.z,
        );
        let distance = direction.length();

        if distance <= stats.attack_range {
            begin_attack(&mut rng.0, clips, &mut state, &mut swing, &mut driver);
            continue;
        }

        if distance > 0.1 {
            let movement = direction.normalize() * stats.move_speed * time.delta_secs();
            enemy_transform.translation += movement;
        }
    }
}

/// Track the swing damage window while attacking.
///
/// The window is open only through the middle of the swing; the attack cue
/// fires once, exactly at window entry. If the player escapes the attack
/// range mid-swing the window is cancelled and the chase resumes.
pub fn enemy_attack(
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut sound_cues: EventWriter<SoundCue>,
    mut enemy_query: Query<
        (
            &Transform,
            &EnemyStats,
            &ClipDurations,
            &mut EnemyState,
            &mut AttackSwing,
            &mut AnimationDriver,
        ),
        With<Enemy>,
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (enemy_transform, stats, clips, mut state, mut swing, mut driver) in
        enemy_query.iter_mut()
    {
        if *state != EnemyState::Attack {
            continue;
        }

        let distance = horizontal_distance(
            player_transform.translation,
            enemy_transform.translation,
        );
        if distance > stats.attack_range {
            swing.window_open = false;
            *state = EnemyState::Chase;
            driver.play_looping(CLIP_RUN, clips.run);
            continue;
        }

        let playing_attack = driver
            .current_name()
            .is_some_and(|name| name == CLIP_ATTACK_A || name == CLIP_ATTACK_B);
        let in_window = playing_attack
            && driver
                .progress()
                .is_some_and(|p| (ATTACK_WINDOW_START..=ATTACK_WINDOW_END).contains(&p));

        if in_window && !swing.window_open && !swing.cue_fired {
            sound_cues.send(SoundCue::EnemyAttack);
            swing.cue_fired = true;
        }
        swing.window_open = in_window;
    }
}

/// React to one-shot clips finishing.
///
/// Attack swings return to Idle (the next decision re-enters Attack or Chase
/// with a fresh coin flip). Hit reactions restore the interrupted state,
/// except that an interrupted attack resumes as Chase - a one-shot swing
/// cannot be resumed mid-flight. A finished death clip fires the death
/// notification and flags the entity for end-of-tick removal.
pub fn enemy_clip_finished(
    mut commands: Commands,
    mut finished: EventReader<AnimationFinished>,
    mut died: EventWriter<EnemyDied>,
    mut enemy_query: Query<
        (
            &ClipDurations,
            &mut EnemyState,
            &PreviousState,
            &mut AttackSwing,
            &mut AnimationDriver,
        ),
        With<Enemy>,
    >,
) {
    for event in finished.read() {
        let Ok((clips, mut state, previous, mut swing, mut driver)) =
            enemy_query.get_mut(event.entity)
        else {
            continue;
        };

        match (*state, event.clip.as_str()) {
            (EnemyState::Attack, CLIP_ATTACK_A | CLIP_ATTACK_B) => {
                swing.window_open = false;
                *state = EnemyState::Idle;
                driver.play_looping(CLIP_IDLE, clips.idle);
            }
            (EnemyState::Hit, CLIP_HIT) => {
                let resume = if previous.0 == EnemyState::Attack {
                    EnemyState::Chase
                } else {
                    previous.0
                };
                *state = resume;
                match resume {
                    EnemyState::Chase => driver.play_looping(CLIP_RUN, clips.run),
                    _ => driver.play_looping(CLIP_IDLE, clips.idle),
                }
            }
            (EnemyState::Death, CLIP_DEATH) => {
                died.send(EnemyDied {
                    entity: event.entity,
                });
                commands.entity(event.entity).insert(Removable);
            }
            _ => {}
        }
    }
}

/// Hit and death interrupts, driven by this tick's damage events.
///
/// Damage while dying was already dropped by the damage system; a Death
/// state here means the transition happened earlier this tick or before,
/// so the event is ignored. Non-lethal damage saves the current state and
/// forces Hit, discarding any in-progress attack window.
pub fn enemy_damage_reaction(
    mut damage_events: EventReader<DamageEvent>,
    mut sound_cues: EventWriter<SoundCue>,
    mut enemy_query: Query<
        (
            &Health,
            &ClipDurations,
            &mut EnemyState,
            &mut PreviousState,
            &mut AttackSwing,
            &mut AnimationDriver,
        ),
        With<Enemy>,
    >,
) {
    for event in damage_events.read() {
        let Ok((health, clips, mut state, mut previous, mut swing, mut driver)) =
            enemy_query.get_mut(event.target)
        else {
            continue;
        };

        if *state == EnemyState::Death {
            continue;
        }

        swing.window_open = false;

        if health.is_dead() {
            *state = EnemyState::Death;
            driver.play_one_shot(CLIP_DEATH, clips.death, 1.0);
            sound_cues.send(SoundCue::EnemyDeath);
            info!("Enemy {:?} died", event.target);
        } else {
            // A hit landing during an earlier hit keeps the originally
            // interrupted state as the one to restore.
            if *state != EnemyState::Hit {
                previous.0 = *state;
            }
            *state = EnemyState::Hit;
            driver.play_one_shot(CLIP_HIT, clips.hit, HIT_REACTION_SPEED);
            sound_cues.send(SoundCue::EnemyHit);
        }
    }
}

fn begin_attack(
    rng: &mut ChaCha8Rng,
    clips: &ClipDurations,
    state: &mut EnemyState,
    swing: &mut AttackSwing,
    driver: &mut AnimationDriver,
) {
    *state = EnemyState::Attack;
    swing.window_open = false;
    swing.cue_fired = false;

    // Unweighted coin flip between the two swing variants.
    let (clip, duration) = if rng.gen_bool(0.5) {
        (CLIP_ATTACK_A, clips.attack_a)
    } else {
        (CLIP_ATTACK_B, clips.attack_b)
    };
    driver.play_one_shot(clip, duration, 1.0);
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec3::new(a.x - b.x, 0.0, a.z - b.z).length()
}
