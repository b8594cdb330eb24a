//! Enemies module - enemy entities, behavior, data, and spawning.

pub mod ai;
mod components;
pub mod data;
mod plugin;
pub mod spawning;
pub mod visuals;

pub use components::*;
pub use plugin::{EnemyPlugin, EnemyVisualsPlugin};
pub use spawning::{enemy_bundle, spawn_enemy, EnemyDied, EnemyPopulation};
