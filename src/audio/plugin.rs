//! Sound cue playback.
//!
//! Combat and behavior systems emit SoundCue events; this plugin maps them
//! to loaded samples and plays them. Missing files degrade to silence.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin, AudioSource};

use crate::core::{GameState, SoundCue};

/// Handles to the loaded combat sounds.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    pub enemy_attack: Handle<AudioSource>,
    pub enemy_hit: Handle<AudioSource>,
    pub enemy_death: Handle<AudioSource>,
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_resource::<SoundLibrary>()
            .add_systems(OnEnter(GameState::Loading), load_sounds)
            .add_systems(
                Update,
                play_sound_cues.run_if(in_state(GameState::InGame)),
            );
    }
}

fn load_sounds(mut library: ResMut<SoundLibrary>, asset_server: Res<AssetServer>) {
    library.enemy_attack = asset_server.load("sounds/enemy_attack.ogg");
    library.enemy_hit = asset_server.load("sounds/enemy_hit.ogg");
    library.enemy_death = asset_server.load("sounds/enemy_death.ogg");
}

fn play_sound_cues(
    mut cues: EventReader<SoundCue>,
    library: Res<SoundLibrary>,
    audio: Res<Audio>,
) {
    for cue in cues.read() {
        let handle = match cue {
            SoundCue::EnemyAttack => &library.enemy_attack,
            SoundCue::EnemyHit => &library.enemy_hit,
            SoundCue::EnemyDeath => &library.enemy_death,
        };
        audio.play(handle.clone());
    }
}
