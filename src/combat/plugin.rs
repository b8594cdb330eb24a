//! Combat plugin - swing tracking and the damage resolution loop.

use bevy::prelude::*;

use super::components::{CombatConfig, EnemyAttackTimers, RecentPlayerHits};
use super::systems;
use crate::core::{GameState, TickSet};

/// Combat plugin - handles all combat resolution systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<RecentPlayerHits>()
            .init_resource::<EnemyAttackTimers>()
            .add_systems(OnEnter(GameState::Loading), systems::load_combat_config)
            .add_systems(
                Update,
                systems::update_player_swing.in_set(TickSet::Behave),
            )
            .add_systems(
                Update,
                (
                    systems::player_strike_enemies,
                    systems::enemies_strike_player,
                    systems::apply_damage,
                    systems::check_player_death,
                )
                    .chain()
                    .in_set(TickSet::Resolve),
            );
    }
}
