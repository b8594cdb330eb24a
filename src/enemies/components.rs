//! Enemy-related components.

use bevy::prelude::*;
use bevy::time::Stopwatch;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone)]
pub struct EnemyKind(pub String);

/// Behavior state machine for an enemy.
///
/// Death is terminal: the entity stays inert until its death clip finishes
/// and the cleanup phase removes it.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum EnemyState {
    /// Waiting out the spawn delay before the first decision.
    #[default]
    Idle,
    /// Moving toward the player.
    Chase,
    /// Playing a one-shot attack swing.
    Attack,
    /// Flinching from a hit; all other logic suspended.
    Hit,
    /// Playing the death clip before removal.
    Death,
}

/// State to restore once a hit reaction finishes.
#[derive(Component, Default, Debug)]
pub struct PreviousState(pub EnemyState);

/// Enemy stats fixed at spawn, loaded from RON data files.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub max_health: f32,
    pub attack_damage: f32,
    pub move_speed: f32,
    /// Reserved threshold for leashing; transitions currently ignore it.
    pub chase_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Time before the first behavior decision.
    pub spawn_delay: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 50.0,
            attack_damage: 10.0,
            move_speed: 3.0,
            chase_range: 8.0,
            attack_range: 2.0,
            attack_cooldown: 1.5,
            spawn_delay: 1.0,
        }
    }
}

/// Time since this enemy was spawned.
#[derive(Component, Default)]
pub struct SpawnClock(pub Stopwatch);

/// Progress of the current attack swing.
#[derive(Component, Default, Debug)]
pub struct AttackSwing {
    /// True only while the attack clip is inside its damage window.
    pub window_open: bool,
    /// The attack cue already fired for this swing.
    pub cue_fired: bool,
}

/// Clip lengths for this enemy's animation set, from its data file.
#[derive(Component, Clone, Copy, Debug)]
pub struct ClipDurations {
    pub idle: f32,
    pub run: f32,
    pub attack_a: f32,
    pub attack_b: f32,
    pub hit: f32,
    pub death: f32,
}

impl Default for ClipDurations {
    fn default() -> Self {
        Self {
            idle: 2.0,
            run: 0.8,
            attack_a: 1.2,
            attack_b: 1.4,
            hit: 0.5,
            death: 1.8,
        }
    }
}

/// Marker: death sequence finished, despawn at end of tick.
#[derive(Component)]
pub struct Removable;

pub const CLIP_IDLE: &str = "idle";
pub const CLIP_RUN: &str = "run";
pub const CLIP_ATTACK_A: &str = "attack_a";
pub const CLIP_ATTACK_B: &str = "attack_b";
pub const CLIP_HIT: &str = "hit";
pub const CLIP_DEATH: &str = "death";

/// Playback speed for the hit reaction clip.
pub const HIT_REACTION_SPEED: f32 = 1.5;
