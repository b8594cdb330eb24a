//! Core plugin that sets up game states, events, and tick ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Phases of one simulation tick, run in order every frame.
///
/// Animation timers advance first, then behavior transitions, then collider
/// volumes are refreshed, and only then does combat resolution run - overlap
/// checks always see the current tick's geometry. Removal of dead entities is
/// deferred to Cleanup so nothing despawns mid-iteration.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    Animate,
    Behave,
    Colliders,
    Resolve,
    Cleanup,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver)
/// - Global events (DamageEvent, DeathEvent, SoundCue)
/// - The tick phase ordering all gameplay systems slot into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<SoundCue>()
            // Tick phase ordering
            .configure_sets(
                Update,
                (
                    TickSet::Animate,
                    TickSet::Behave,
                    TickSet::Colliders,
                    TickSet::Resolve,
                    TickSet::Cleanup,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            // Loading state - data loaders also run here, then we start
            .add_systems(OnEnter(GameState::Loading), finish_loading);
    }
}

/// Transition from Loading to InGame.
///
/// Data loaders run in the same OnEnter schedule; the state switch is only
/// applied afterwards, so the registries are populated before gameplay starts.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}
