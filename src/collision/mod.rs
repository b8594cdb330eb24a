//! Hitbox/hurtbox bookkeeping.
//!
//! Bounding volumes are rebuilt from entity transforms every tick during the
//! Colliders phase, so combat resolution always tests current-tick geometry.
//! Volumes are `None` until their owning entity has a shape to build from -
//! a missing volume silently skips the overlap check, since shapes populate
//! asynchronously after model load.

use bevy::math::bounding::{Aabb3d, IntersectsVolume};
use bevy::prelude::*;

use crate::combat::{CombatConfig, PlayerCombat};
use crate::core::TickSet;

/// Body volume where a combatant can be damaged.
///
/// Recomputed every tick; never persisted.
#[derive(Component, Default, Debug)]
pub struct Hurtbox(pub Option<Aabb3d>);

/// Shape used to rebuild the hurtbox around the entity origin.
#[derive(Component, Clone, Copy, Debug)]
pub struct HurtboxShape {
    pub half_extents: Vec3,
    /// Offset from the entity origin to the volume center.
    pub offset: Vec3,
}

impl HurtboxShape {
    /// Upright body volume standing on the entity origin.
    pub fn upright(radius: f32, half_height: f32) -> Self {
        Self {
            half_extents: Vec3::new(radius, half_height, radius),
            offset: Vec3::Y * half_height,
        }
    }
}

/// The player's active strike zone, distinct from its hurtbox.
///
/// Only populated while the swing is inside its damage window.
#[derive(Component, Default, Debug)]
pub struct AttackVolume(pub Option<Aabb3d>);

/// Collision plugin - refreshes all bounding volumes once per tick.
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (refresh_hurtboxes, refresh_attack_volume).in_set(TickSet::Colliders),
        );
    }
}

/// Rebuild every hurtbox from its owner's current transform.
pub fn refresh_hurtboxes(mut query: Query<(&Transform, &HurtboxShape, &mut Hurtbox)>) {
    for (transform, shape, mut hurtbox) in query.iter_mut() {
        hurtbox.0 = Some(Aabb3d::new(
            transform.translation + shape.offset,
            shape.half_extents,
        ));
    }
}

/// Rebuild the player's strike volume in front of the facing direction.
///
/// Cleared whenever the swing is outside its damage window.
pub fn refresh_attack_volume(
    config: Res<CombatConfig>,
    mut query: Query<(&Transform, &PlayerCombat, &mut AttackVolume)>,
) {
    for (transform, combat, mut volume) in query.iter_mut() {
        if !combat.is_attack_active() {
            volume.0 = None;
            continue;
        }

        let direction = transform.forward().as_vec3();
        let reach = config.player_attack_range;
        // Centered slightly in front of the player, chest height.
        let center = transform.translation + direction * (reach * 0.5) + Vec3::Y * 0.5;
        volume.0 = Some(Aabb3d::new(center, Vec3::splat(reach * 0.6)));
    }
}

/// Overlap test between two volumes.
pub fn volumes_overlap(a: &Aabb3d, b: &Aabb3d) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hurtbox_follows_transform() {
        let shape = HurtboxShape::upright(0.4, 0.9);
        let transform = Transform::from_xyz(3.0, 0.0, -1.0);

        let aabb = Aabb3d::new(transform.translation + shape.offset, shape.half_extents);
        assert!((Vec3::from(aabb.min) - Vec3::new(2.6, 0.0, -1.4)).length() < 1e-5);
        assert!((Vec3::from(aabb.max) - Vec3::new(3.4, 1.8, -0.6)).length() < 1e-5);
    }

    #[test]
    fn overlap_is_symmetric_and_respects_separation() {
        let a = Aabb3d::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb3d::new(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        let c = Aabb3d::new(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));

        assert!(volumes_overlap(&a, &b));
        assert!(volumes_overlap(&b, &a));
        assert!(!volumes_overlap(&a, &c));
    }
}
