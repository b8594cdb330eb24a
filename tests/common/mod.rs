//! Shared harness for headless simulation tests.
//!
//! Builds an `App` with the simulation plugins only (no rendering, audio,
//! or input), a manually advanced clock, and a fixed RNG seed, then drives
//! it tick by tick.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hollowgate::animation::{AnimationDriver, AnimationPlugin};
use hollowgate::collision::{AttackVolume, CollisionPlugin, Hurtbox, HurtboxShape};
use hollowgate::combat::{CombatPlugin, Health, PlayerCombat};
use hollowgate::core::{CorePlugin, DamageEvent};
use hollowgate::enemies::ai::AttackVariantRng;
use hollowgate::enemies::data::{ClipTimings, EnemyDefinition};
use hollowgate::enemies::{enemy_bundle, EnemyPlugin, EnemyState};
use hollowgate::player::Player;

pub const PLAYER_SWING_DURATION: f32 = 0.6;

/// Headless simulation app with a fixed RNG seed, settled into gameplay.
pub fn sim_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .insert_resource(Time::<()>::default())
        .add_plugins((
            CorePlugin,
            AnimationPlugin,
            CollisionPlugin,
            CombatPlugin,
            EnemyPlugin,
        ))
        .insert_resource(AttackVariantRng(ChaCha8Rng::seed_from_u64(seed)));

    // First update runs the loaders, the second applies the state switch.
    app.update();
    app.update();
    app
}

/// Advance the clock and run one simulation tick.
pub fn tick(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

/// Run fixed-step ticks until the given duration is covered.
pub fn run_for(app: &mut App, seconds: f32, step: f32) {
    let steps = (seconds / step).round() as u32;
    for _ in 0..steps {
        tick(app, step);
    }
}

/// A definition equivalent to the stock ghoul, tweakable per test.
pub fn test_definition() -> EnemyDefinition {
    EnemyDefinition {
        name: "Test Ghoul".to_string(),
        color: (1.0, 1.0, 1.0),
        radius: 0.4,
        max_health: 50.0,
        attack_damage: 10.0,
        move_speed: 3.0,
        chase_range: 8.0,
        attack_range: 2.0,
        attack_cooldown: 1.5,
        spawn_delay: 0.0,
        model_path: String::new(),
        scale: 1.0,
        collider: None,
        indices: None,
        clips: ClipTimings::default(),
    }
}

pub fn spawn_enemy_at(app: &mut App, definition: &EnemyDefinition, position: Vec3) -> Entity {
    app.world_mut()
        .spawn(enemy_bundle(definition, "test", position))
        .id()
}

/// Player entity without the input systems; tests drive the swing directly.
pub fn spawn_player_at(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            PlayerCombat::new(PLAYER_SWING_DURATION),
            Health::new(100.0),
            AttackVolume::default(),
            HurtboxShape::upright(0.35, 0.9),
            Hurtbox::default(),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn enemy_state(app: &App, entity: Entity) -> EnemyState {
    *app.world().get::<EnemyState>(entity).unwrap()
}

pub fn current_clip(app: &App, entity: Entity) -> Option<String> {
    app.world()
        .get::<AnimationDriver>(entity)
        .and_then(|driver| driver.current_name().map(str::to_string))
}

pub fn health_of(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).unwrap().current()
}

pub fn start_swing(app: &mut App, player: Entity) {
    app.world_mut()
        .get_mut::<PlayerCombat>(player)
        .unwrap()
        .start_swing();
}

pub fn set_translation(app: &mut App, entity: Entity, position: Vec3) {
    app.world_mut()
        .get_mut::<Transform>(entity)
        .unwrap()
        .translation = position;
}

pub fn send_damage(app: &mut App, target: Entity, source: Entity, amount: f32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source,
        amount,
        knockback: Vec3::ZERO,
    });
}
