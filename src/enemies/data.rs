//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::components::{ClipDurations, EnemyStats};
use crate::collision::HurtboxShape;

/// Errors that can occur when loading data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Read and parse a RON file into any deserializable value.
pub fn read_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Animation clip indices into an enemy's glTF file.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct AnimationIndices {
    pub idle: u32,
    pub run: u32,
    pub attack_a: u32,
    pub attack_b: u32,
    pub hit: u32,
    pub death: u32,
}

/// Clip lengths in seconds, the timing source for the state machine.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct ClipTimings {
    pub idle: f32,
    pub run: f32,
    pub attack_a: f32,
    pub attack_b: f32,
    pub hit: f32,
    pub death: f32,
}

impl Default for ClipTimings {
    fn default() -> Self {
        let durations = ClipDurations::default();
        Self {
            idle: durations.idle,
            run: durations.run,
            attack_a: durations.attack_a,
            attack_b: durations.attack_b,
            hit: durations.hit,
            death: durations.death,
        }
    }
}

/// Body volume configuration for an enemy type.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// Enemy definition loaded from a RON file. Immutable after spawn.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    /// Tint for the placeholder body.
    pub color: (f32, f32, f32),
    /// Body radius for the placeholder mesh and the default hurtbox.
    pub radius: f32,
    pub max_health: f32,
    pub attack_damage: f32,
    pub move_speed: f32,
    pub chase_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub spawn_delay: f32,
    /// Empty means no model; the placeholder body stays.
    #[serde(default)]
    pub model_path: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    #[serde(default)]
    pub indices: Option<AnimationIndices>,
    #[serde(default)]
    pub clips: ClipTimings,
}

impl EnemyDefinition {
    /// Convert to the EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            attack_damage: self.attack_damage,
            move_speed: self.move_speed,
            chase_range: self.chase_range,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
            spawn_delay: self.spawn_delay,
        }
    }

    /// Convert to the ClipDurations component.
    pub fn clip_durations(&self) -> ClipDurations {
        ClipDurations {
            idle: self.clips.idle,
            run: self.clips.run,
            attack_a: self.clips.attack_a,
            attack_b: self.clips.attack_b,
            hit: self.clips.hit,
            death: self.clips.death,
        }
    }

    /// Hurtbox shape, from the collider config or derived from the radius.
    pub fn hurtbox_shape(&self) -> HurtboxShape {
        let collider = self.collider.unwrap_or(ColliderConfig {
            half_height: self.radius * 2.25,
            radius: self.radius,
        });
        HurtboxShape::upright(collider.radius, collider.half_height)
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_kind: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_kind)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_kind = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match read_ron::<EnemyDefinition>(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_kind);
                    registry.definitions.insert(enemy_kind, definition);
                }
                Err(e) => error!("Failed to load enemy definition: {e}"),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
