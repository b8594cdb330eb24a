//! Player plugin - spawning, input, and movement.

use bevy::prelude::*;

use super::components::PlayerConfig;
use super::movement;
use crate::core::{GameState, TickSet};

/// Player plugin - input and movement run before the behavior phase so
/// enemies and combat see this tick's player position and swing intent.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(OnEnter(GameState::InGame), movement::spawn_player)
            .add_systems(
                Update,
                (
                    movement::player_look,
                    movement::player_move,
                    movement::attack_input,
                )
                    .before(TickSet::Behave)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
