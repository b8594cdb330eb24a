//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The whole
//! simulation tick (behavior, colliders, combat resolution) only runs
//! while in the InGame state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Enter `InGame` once the registries are populated
/// - `GameOver` when the player dies; the simulation halts
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}
