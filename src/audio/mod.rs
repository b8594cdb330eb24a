//! Audio module - sound cue playback.

mod plugin;

pub use plugin::{GameAudioPlugin, SoundLibrary};
