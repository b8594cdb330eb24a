//! Combat module - health, the player swing, and damage resolution.

mod components;
mod plugin;
pub mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
