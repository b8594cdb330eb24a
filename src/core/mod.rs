//! Core game module - states, events, and tick ordering.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod states;

pub use events::{DamageEvent, DeathEvent, SoundCue};
pub use plugin::{CorePlugin, TickSet};
pub use states::GameState;
