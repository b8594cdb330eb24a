//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. The combat loop sends
//! DamageEvents, the damage system applies them to health, and the enemy
//! state machine reacts with hit/death transitions. This keeps systems
//! independent and testable.

use bevy::prelude::*;

/// Sent when an entity takes damage.
///
/// The damage system listens for these events and applies the actual
/// health reduction and knockback displacement.
#[derive(Event, Debug)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
    /// Knockback displacement, already scaled; zero for no knockback
    pub knockback: Vec3,
}

/// Sent once when an entity's health reaches 0.
///
/// Systems can listen for this to trigger death animations or end the game.
#[derive(Event, Debug)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Fire-and-forget sound trigger, consumed by the audio plugin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// An enemy attack swing entered its damage window.
    EnemyAttack,
    /// An enemy took a non-lethal hit.
    EnemyHit,
    /// An enemy started its death sequence.
    EnemyDeath,
}
