//! Clip timing and completion events.
//!
//! The simulation owns animation *timing*: which clip an entity is playing,
//! how far along it is, and when a one-shot finishes. Rendering-side playback
//! (Bevy's `AnimationPlayer`) mirrors this state but never drives it, so the
//! state machine stays deterministic and headless-testable. Completion is an
//! explicit `AnimationFinished` event emitted during the Animate phase and
//! consumed later in the same tick, never an asynchronous callback.

use bevy::prelude::*;

use crate::core::TickSet;

/// A clip currently being played by an [`AnimationDriver`].
#[derive(Clone, Debug)]
pub struct ActiveClip {
    pub name: String,
    /// Nominal clip length in seconds.
    pub duration: f32,
    /// Seconds of clip time consumed so far (already speed-scaled).
    pub elapsed: f32,
    /// Playback speed multiplier.
    pub speed: f32,
    pub looping: bool,
}

/// Timing source of truth for an entity's animation.
#[derive(Component, Default, Debug)]
pub struct AnimationDriver {
    current: Option<ActiveClip>,
    /// Bumped every time playback changes, so presentation can detect restarts.
    pub generation: u32,
}

impl AnimationDriver {
    /// Start a looping clip from the beginning.
    pub fn play_looping(&mut self, name: impl Into<String>, duration: f32) {
        self.current = Some(ActiveClip {
            name: name.into(),
            duration,
            elapsed: 0.0,
            speed: 1.0,
            looping: true,
        });
        self.generation = self.generation.wrapping_add(1);
    }

    /// Start a one-shot clip from the beginning at the given speed.
    pub fn play_one_shot(&mut self, name: impl Into<String>, duration: f32, speed: f32) {
        self.current = Some(ActiveClip {
            name: name.into(),
            duration,
            elapsed: 0.0,
            speed,
            looping: false,
        });
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn stop(&mut self) {
        self.current = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn current(&self) -> Option<&ActiveClip> {
        self.current.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|clip| clip.name.as_str())
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.current_name() == Some(name)
    }

    /// Progress fraction of the current clip in `[0, 1]`, if any.
    pub fn progress(&self) -> Option<f32> {
        self.current.as_ref().map(|clip| {
            if clip.duration > 0.0 {
                (clip.elapsed / clip.duration).clamp(0.0, 1.0)
            } else {
                1.0
            }
        })
    }
}

/// Sent when a one-shot clip reaches its end.
#[derive(Event, Debug, Clone)]
pub struct AnimationFinished {
    pub entity: Entity,
    /// Name of the clip that completed.
    pub clip: String,
}

/// Animation plugin - advances clip timers at the start of every tick.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationFinished>()
            .add_systems(Update, advance_animations.in_set(TickSet::Animate));
    }
}

/// Advance every driver by scaled delta time.
///
/// Looping clips wrap; one-shots that reach their end emit AnimationFinished
/// and stop, so progress queries later in the tick report nothing.
pub fn advance_animations(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationDriver)>,
    mut finished: EventWriter<AnimationFinished>,
) {
    for (entity, mut driver) in query.iter_mut() {
        let completed = {
            let Some(clip) = driver.current.as_mut() else {
                continue;
            };
            clip.elapsed += time.delta_secs() * clip.speed;
            if clip.looping {
                if clip.duration > 0.0 {
                    clip.elapsed %= clip.duration;
                }
                None
            } else if clip.elapsed >= clip.duration {
                Some(clip.name.clone())
            } else {
                None
            }
        };

        if let Some(name) = completed {
            driver.stop();
            finished.send(AnimationFinished { entity, clip: name });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.add_event::<AnimationFinished>();
        app.add_systems(Update, advance_animations);
        app
    }

    fn tick(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn finished_clips(app: &mut App) -> Vec<String> {
        let events = app.world().resource::<Events<AnimationFinished>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).map(|event| event.clip.clone()).collect()
    }

    #[test]
    fn one_shot_emits_finished_exactly_once() {
        let mut app = test_app();
        let mut driver = AnimationDriver::default();
        driver.play_one_shot("swing", 1.0, 1.0);
        let entity = app.world_mut().spawn(driver).id();

        tick(&mut app, 0.6);
        assert!(finished_clips(&mut app).is_empty());

        tick(&mut app, 0.6);
        assert_eq!(finished_clips(&mut app), vec!["swing".to_string()]);
        assert!(app
            .world()
            .get::<AnimationDriver>(entity)
            .unwrap()
            .current()
            .is_none());

        // Nothing left to finish.
        tick(&mut app, 1.0);
        tick(&mut app, 1.0);
        assert!(finished_clips(&mut app).is_empty());
    }

    #[test]
    fn looping_clip_wraps_and_never_finishes() {
        let mut app = test_app();
        let mut driver = AnimationDriver::default();
        driver.play_looping("idle", 2.0);
        let entity = app.world_mut().spawn(driver).id();

        tick(&mut app, 2.5);
        assert!(finished_clips(&mut app).is_empty());

        let driver = app.world().get::<AnimationDriver>(entity).unwrap();
        assert!(driver.is_playing("idle"));
        let progress = driver.progress().unwrap();
        assert!((progress - 0.25).abs() < 1e-5, "progress = {progress}");
    }

    #[test]
    fn speed_scales_elapsed_time() {
        let mut app = test_app();
        let mut driver = AnimationDriver::default();
        // 1.5x playback finishes a 0.6s clip in 0.4s of wall time.
        driver.play_one_shot("flinch", 0.6, 1.5);
        app.world_mut().spawn(driver);

        tick(&mut app, 0.3);
        assert!(finished_clips(&mut app).is_empty());
        tick(&mut app, 0.11);
        assert_eq!(finished_clips(&mut app), vec!["flinch".to_string()]);
    }

    #[test]
    fn progress_reports_fraction() {
        let mut driver = AnimationDriver::default();
        assert_eq!(driver.progress(), None);
        driver.play_one_shot("swing", 2.0, 1.0);
        assert_eq!(driver.progress(), Some(0.0));
    }
}
