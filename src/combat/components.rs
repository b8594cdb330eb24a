//! Combat-related components, configuration, and side tables.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Fraction of a swing at which the damage window opens.
pub const ATTACK_WINDOW_START: f32 = 0.45;
/// Fraction of a swing at which the damage window closes.
pub const ATTACK_WINDOW_END: f32 = 0.55;

/// Component for entities that can take damage.
///
/// There is no heal path: outside of construction, `current` only ever
/// decreases, and it is clamped to `[0, maximum]`.
#[derive(Component, Debug)]
pub struct Health {
    current: f32,
    maximum: f32,
}

impl Health {
    pub fn new(maximum: f32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.maximum);
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Marker for entities whose death sequence has begun.
///
/// Inserted exactly once when health reaches zero; damage against marked
/// entities is dropped.
#[derive(Component)]
pub struct Dead;

/// Player swing state.
///
/// A strike only deals damage during the middle stretch of the swing; the
/// attack volume is populated from this window each tick.
#[derive(Component, Debug)]
pub struct PlayerCombat {
    swing_duration: f32,
    swing_elapsed: Option<f32>,
}

impl PlayerCombat {
    pub fn new(swing_duration: f32) -> Self {
        Self {
            swing_duration,
            swing_elapsed: None,
        }
    }

    /// Begin a swing unless one is already in flight.
    pub fn start_swing(&mut self) {
        if self.swing_elapsed.is_none() {
            self.swing_elapsed = Some(0.0);
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.swing_elapsed.is_some()
    }

    /// True only while the swing is inside its damage window.
    pub fn is_attack_active(&self) -> bool {
        self.swing_elapsed.is_some_and(|elapsed| {
            let progress = elapsed / self.swing_duration;
            (ATTACK_WINDOW_START..=ATTACK_WINDOW_END).contains(&progress)
        })
    }

    pub fn tick(&mut self, delta: f32) {
        if let Some(elapsed) = self.swing_elapsed.as_mut() {
            *elapsed += delta;
            if *elapsed >= self.swing_duration {
                self.swing_elapsed = None;
            }
        }
    }
}

/// Combat loop tunables, overridable from `assets/data/combat.ron`.
#[derive(Resource, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CombatConfig {
    /// Reach of the player's strike volume.
    pub player_attack_range: f32,
    /// Reserved for a future cone test; the overlap check ignores it.
    pub player_attack_angle: f32,
    pub player_attack_damage: f32,
    /// Minimum time between two successful hits on the same enemy.
    pub player_rehit_cooldown: f32,
    /// Horizontal displacement applied to an enemy on a successful hit.
    pub knockback_distance: f32,
    pub player_swing_duration: f32,
    /// Fallback when an enemy definition carries no usable cooldown.
    pub enemy_attack_cooldown: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_attack_range: 2.5,
            player_attack_angle: 1.2,
            player_attack_damage: 15.0,
            player_rehit_cooldown: 1.0,
            knockback_distance: 1.0,
            player_swing_duration: 0.6,
            enemy_attack_cooldown: 1.5,
        }
    }
}

/// Last successful player hit per enemy, in seconds of elapsed game time.
///
/// Owned by the combat loop rather than the enemy so the loop can reset it
/// without involving the state machine. Entries are removed when the enemy is.
#[derive(Resource, Default, Debug)]
pub struct RecentPlayerHits(pub HashMap<Entity, f32>);

/// Remaining attack cooldown per enemy, owned by the combat loop.
///
/// Distinct from the enemy's own swing window: this table gates actual damage
/// to the player, the window only gates the attack sound/visual. Timers only
/// tick down while the enemy is in range.
#[derive(Resource, Default, Debug)]
pub struct EnemyAttackTimers(pub HashMap<Entity, f32>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_to_zero_and_stays_there() {
        let mut health = Health::new(50.0);
        health.take_damage(15.0);
        assert_eq!(health.current(), 35.0);
        assert!(!health.is_dead());

        health.take_damage(100.0);
        assert_eq!(health.current(), 0.0);
        assert!(health.is_dead());

        // Dying is permanent; further damage is a no-op on the value.
        health.take_damage(5.0);
        assert_eq!(health.current(), 0.0);
    }

    #[test]
    fn negative_damage_cannot_heal_past_maximum() {
        let mut health = Health::new(50.0);
        health.take_damage(-500.0);
        assert_eq!(health.current(), health.maximum());
        assert_eq!(health.current(), 50.0);
    }

    #[test]
    fn swing_window_covers_middle_of_swing_only() {
        let mut combat = PlayerCombat::new(1.0);
        assert!(!combat.is_attack_active());

        combat.start_swing();
        combat.tick(0.44);
        assert!(!combat.is_attack_active());

        combat.tick(0.01);
        assert!(combat.is_attack_active(), "window opens at 45%");

        combat.tick(0.10);
        assert!(combat.is_attack_active(), "window closes at 55%");

        combat.tick(0.01);
        assert!(!combat.is_attack_active());

        combat.tick(0.50);
        assert!(!combat.is_swinging(), "swing ends after its duration");
    }

    #[test]
    fn start_swing_does_not_restart_one_in_flight() {
        let mut combat = PlayerCombat::new(1.0);
        combat.start_swing();
        combat.tick(0.5);
        combat.start_swing();
        assert!(combat.is_attack_active(), "swing progress is preserved");
    }
}
