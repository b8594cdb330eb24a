//! Player module - player entity, input, and movement.

mod components;
mod movement;
mod plugin;

pub use components::{Player, PlayerCamera, PlayerConfig};
pub use plugin::PlayerPlugin;
