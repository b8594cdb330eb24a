//! Player spawning, movement, and attack input.
//!
//! Movement is flat and first-person: WASD relative to facing, mouse for
//! yaw. There is no physics body; the arena is a plane and combat knockback
//! never applies to the player.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use super::components::{Player, PlayerCamera, PlayerConfig};
use crate::collision::{AttackVolume, Hurtbox, HurtboxShape};
use crate::combat::{CombatConfig, Health, PlayerCombat};

/// Spawn the player with camera at the arena origin.
pub fn spawn_player(
    mut commands: Commands,
    player_config: Res<PlayerConfig>,
    combat_config: Res<CombatConfig>,
) {
    commands
        .spawn((
            Player,
            PlayerCombat::new(combat_config.player_swing_duration),
            Health::new(player_config.max_health),
            AttackVolume::default(),
            HurtboxShape::upright(0.35, 0.9),
            Hurtbox::default(),
            Transform::from_xyz(0.0, 0.0, 0.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Camera3d::default(),
                PlayerCamera,
                Transform::from_xyz(0.0, 1.6, 0.0),
            ));
        });
}

/// Rotate the player with horizontal mouse motion.
pub fn player_look(
    config: Res<PlayerConfig>,
    mut motion_events: EventReader<MouseMotion>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    for motion in motion_events.read() {
        transform.rotate_y(-motion.delta.x * config.mouse_sensitivity * 0.001);
    }
}

/// Move the player with WASD relative to facing, horizontal only.
pub fn player_move(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<PlayerConfig>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    let mut input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if input == Vec3::ZERO {
        return;
    }

    let mut direction = transform.rotation * input.normalize();
    direction.y = 0.0;
    let direction = direction.normalize_or_zero();
    transform.translation += direction * config.move_speed * time.delta_secs();
}

/// Start a swing on left click.
pub fn attack_input(
    mouse: Res<ButtonInput<MouseButton>>,
    mut query: Query<&mut PlayerCombat, With<Player>>,
) {
    let Ok(mut combat) = query.get_single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        combat.start_swing();
    }
}
