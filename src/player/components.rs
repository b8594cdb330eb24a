//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera;

/// Configuration for the player controller.
#[derive(Resource)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 5.0,
            mouse_sensitivity: 1.5,
        }
    }
}
