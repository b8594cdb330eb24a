//! Hollowgate - a first-person melee arena.
//!
//! The simulation runs as a fixed chain of phases every frame: animation
//! timing advances first, behavior reads it, collider volumes refresh from
//! the new transforms, combat resolves against those volumes, and cleanup
//! removes what finished dying. Presentation (rendering, audio, input)
//! hangs off the simulation but the simulation never depends on it, which
//! is what lets the integration tests drive a headless `App`.

pub mod animation;
pub mod audio;
pub mod collision;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Everything the game needs on top of Bevy's defaults.
pub struct HollowgatePlugin;

impl Plugin for HollowgatePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            animation::AnimationPlugin,
            collision::CollisionPlugin,
            combat::CombatPlugin,
            enemies::EnemyPlugin,
            enemies::EnemyVisualsPlugin,
            player::PlayerPlugin,
            world::WorldPlugin,
            audio::GameAudioPlugin,
        ));
    }
}
