use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use hollowgate::HollowgatePlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hollowgate".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(HollowgatePlugin)
        .add_systems(Startup, grab_cursor)
        .run();
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}
