//! Combat resolution: re-hit gating, knockback, cooldowns, and the
//! health/death contract, all through the headless tick loop.

mod common;

use bevy::prelude::*;
use common::*;
use hollowgate::animation::AnimationDriver;
use hollowgate::collision::Hurtbox;
use hollowgate::combat::{CombatConfig, EnemyAttackTimers, Health};
use hollowgate::core::{DeathEvent, GameState};
use hollowgate::enemies::{
    AttackSwing, ClipDurations, Enemy, EnemyKind, EnemyState, EnemyStats, PreviousState,
    SpawnClock,
};

#[test]
fn rehit_cooldown_limits_hits_per_enemy() {
    let mut app = sim_app(11);
    // Zero knockback keeps the enemy inside the strike volume for every swing.
    app.insert_resource(CombatConfig {
        knockback_distance: 0.0,
        ..Default::default()
    });

    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let mut definition = test_definition();
    definition.spawn_delay = 60.0;
    let enemy = spawn_enemy_at(&mut app, &definition, Vec3::new(0.0, 0.0, -1.5));

    // Continuous swinging for 2.2s puts damage windows at roughly 0.3s,
    // 0.9s, 1.5s, and 2.1s; the 1s re-hit cooldown lets only two land.
    for _ in 0..44 {
        start_swing(&mut app, player);
        tick(&mut app, 0.05);
    }

    assert_eq!(health_of(&app, enemy), 20.0);
}

#[test]
fn knockback_pushes_enemy_straight_back() {
    let mut app = sim_app(12);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let mut definition = test_definition();
    definition.spawn_delay = 60.0;
    let enemy = spawn_enemy_at(&mut app, &definition, Vec3::new(0.0, 0.0, -2.0));

    start_swing(&mut app, player);
    run_for(&mut app, 0.35, 0.05);

    assert_eq!(health_of(&app, enemy), 35.0);
    let translation = app.world().get::<Transform>(enemy).unwrap().translation;
    assert!((translation.z + 3.0).abs() < 1e-4, "z = {}", translation.z);
    assert!(translation.x.abs() < 1e-4);
    assert_eq!(translation.y, 0.0, "knockback never leaves the ground plane");
}

#[test]
fn repeated_damage_reaches_zero_and_dies_once() {
    let mut app = sim_app(13);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let mut definition = test_definition();
    definition.spawn_delay = 60.0;
    let enemy = spawn_enemy_at(&mut app, &definition, Vec3::new(0.0, 0.0, 5.0));

    let mut cursor = app.world().resource::<Events<DeathEvent>>().get_cursor();
    let mut deaths = 0;

    for expected in [35.0, 20.0, 5.0, 0.0] {
        send_damage(&mut app, enemy, player, 15.0);
        tick(&mut app, 0.05);
        assert_eq!(health_of(&app, enemy), expected);
        deaths += cursor
            .read(app.world().resource::<Events<DeathEvent>>())
            .count();
        // Space the hits past the flinch reaction.
        run_for(&mut app, 1.0, 0.05);
    }

    assert_eq!(deaths, 1);
    assert_eq!(enemy_state(&app, enemy), EnemyState::Death);

    // A fifth hit is dropped, not queued.
    send_damage(&mut app, enemy, player, 15.0);
    tick(&mut app, 0.05);
    assert_eq!(health_of(&app, enemy), 0.0);
    assert_eq!(enemy_state(&app, enemy), EnemyState::Death);
    deaths += cursor
        .read(app.world().resource::<Events<DeathEvent>>())
        .count();
    assert_eq!(deaths, 1);
}

#[test]
fn enemy_attack_timer_only_decays_in_range() {
    let mut app = sim_app(14);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -1.0));
    let mut definition = test_definition();
    definition.spawn_delay = 60.0;
    let enemy = spawn_enemy_at(&mut app, &definition, Vec3::ZERO);

    // First contact lands immediately, then the 1.5s cooldown arms.
    tick(&mut app, 0.05);
    assert_eq!(health_of(&app, player), 90.0);

    run_for(&mut app, 1.2, 0.05);
    assert_eq!(health_of(&app, player), 90.0);
    let remaining = *app
        .world()
        .resource::<EnemyAttackTimers>()
        .0
        .get(&enemy)
        .unwrap();
    assert!((remaining - 0.3).abs() < 1e-3, "remaining = {remaining}");

    // Out of range the timer holds instead of decaying.
    set_translation(&mut app, player, Vec3::new(0.0, 0.0, -10.0));
    run_for(&mut app, 1.0, 0.05);
    let held = *app
        .world()
        .resource::<EnemyAttackTimers>()
        .0
        .get(&enemy)
        .unwrap();
    assert_eq!(held, remaining);
    assert_eq!(health_of(&app, player), 90.0);

    // Back in range it resumes, then fires and re-arms.
    set_translation(&mut app, player, Vec3::new(0.0, 0.0, -1.0));
    run_for(&mut app, 0.2, 0.05);
    assert_eq!(health_of(&app, player), 90.0);
    run_for(&mut app, 0.3, 0.05);
    assert_eq!(health_of(&app, player), 80.0);
}

#[test]
fn first_strike_lands_on_contact() {
    let mut app = sim_app(15);
    let player = spawn_player_at(&mut app, Vec3::new(0.0, 0.0, -5.0));
    let mut definition = test_definition();
    definition.spawn_delay = 60.0;
    let enemy = spawn_enemy_at(&mut app, &definition, Vec3::ZERO);

    // Out of range: no damage and no cooldown entry at all.
    run_for(&mut app, 0.5, 0.05);
    assert!(app
        .world()
        .resource::<EnemyAttackTimers>()
        .0
        .get(&enemy)
        .is_none());
    assert_eq!(health_of(&app, player), 100.0);

    set_translation(&mut app, player, Vec3::new(0.0, 0.0, -1.5));
    tick(&mut app, 0.05);
    assert_eq!(health_of(&app, player), 90.0);
}

#[test]
fn player_death_ends_the_run_and_halts_the_tick() {
    let mut app = sim_app(17);
    let player = spawn_player_at(&mut app, Vec3::ZERO);
    let enemy = spawn_enemy_at(&mut app, &test_definition(), Vec3::new(0.0, 0.0, 6.0));

    tick(&mut app, 0.05);
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chase);

    send_damage(&mut app, player, enemy, 100.0);
    tick(&mut app, 0.05);
    assert_eq!(health_of(&app, player), 0.0);

    // The state switch requested on the lethal tick applies on the next one.
    tick(&mut app, 0.05);
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );

    // With the run over the simulation phases stop: the chaser freezes.
    let frozen = app.world().get::<Transform>(enemy).unwrap().translation;
    run_for(&mut app, 0.5, 0.05);
    let after = app.world().get::<Transform>(enemy).unwrap().translation;
    assert_eq!(frozen, after);
    assert_eq!(enemy_state(&app, enemy), EnemyState::Chase);
}

#[test]
fn enemy_without_body_volume_is_skipped() {
    let mut app = sim_app(16);
    let player = spawn_player_at(&mut app, Vec3::ZERO);

    // No shape component, so the hurtbox never populates and strikes
    // pass through without effect.
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            EnemyKind("test".to_string()),
            EnemyStats {
                spawn_delay: 60.0,
                ..Default::default()
            },
            ClipDurations::default(),
            Health::new(50.0),
            EnemyState::default(),
            PreviousState::default(),
            AttackSwing::default(),
            SpawnClock::default(),
            AnimationDriver::default(),
            Hurtbox::default(),
            Transform::from_xyz(0.0, 0.0, -1.5),
        ))
        .id();

    for _ in 0..14 {
        start_swing(&mut app, player);
        tick(&mut app, 0.05);
    }

    assert_eq!(health_of(&app, enemy), 50.0);
}
