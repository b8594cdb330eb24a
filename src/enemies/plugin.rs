//! Enemy plugin - registers behavior, lifecycle, and presentation systems.

use bevy::prelude::*;

use super::ai::{self, AttackVariantRng};
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::{self, EnemyDied, EnemyPopulation};
use super::visuals;
use crate::core::{GameState, TickSet};

/// Enemy plugin - the behavior state machine and lifecycle bookkeeping.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<EnemyPopulation>()
            .init_resource::<AttackVariantRng>()
            .add_event::<EnemyDied>()
            // Load definitions while the Loading state is active
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            // Behavior runs after animation timers have advanced
            .add_systems(
                Update,
                (
                    ai::tick_spawn_clocks,
                    ai::enemy_face_player,
                    ai::enemy_decide,
                    ai::enemy_chase,
                    ai::enemy_attack,
                    ai::enemy_clip_finished,
                )
                    .chain()
                    .in_set(TickSet::Behave),
            )
            // Hit/death reactions see the damage applied earlier this tick
            .add_systems(
                Update,
                ai::enemy_damage_reaction
                    .in_set(TickSet::Resolve)
                    .after(crate::combat::systems::apply_damage),
            )
            // Lifecycle bookkeeping and deferred removal
            .add_systems(
                Update,
                (spawning::track_spawns, spawning::remove_finished_enemies)
                    .chain()
                    .in_set(TickSet::Cleanup),
            );
    }
}

/// Enemy presentation plugin - placeholder bodies, models, and clip playback.
///
/// Kept separate from the behavior plugin so headless simulations and tests
/// can run without renderer resources.
pub struct EnemyVisualsPlugin;

impl Plugin for EnemyVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                visuals::attach_enemy_visuals,
                visuals::setup_enemy_animations,
                visuals::sync_clip_playback,
            )
                .chain()
                .after(TickSet::Resolve)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
