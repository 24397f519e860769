//! Locomotion geometry: chase lead, strafe ring, capped manual rotation.
//!
//! Чистые функции без ECS — контроллер вызывает их каждый тик.
//! Forward актора = `Transform::forward()` (-Z), вверх = +Y.

use bevy::prelude::*;

/// Below this squared length the actor is treated as standing on the target center.
const STRAFE_RADIAL_EPSILON_SQ: f32 = 0.001;

/// Below this squared length the flattened facing direction is ignored.
const ROTATION_EPSILON_SQ: f32 = 0.0001;

/// Chase destination with linear lead. Zero velocity → the target itself.
pub fn predict_target_position(position: Vec3, velocity: Vec3, lead_time: f32) -> Vec3 {
    position + velocity * lead_time
}

/// Point on the strafe ring, pushed tangentially in the current strafe direction.
///
/// radial = normalize(actor - center), fallback `-target_forward` when the actor
/// stands on the center; tangent = normalize(up × radial).
pub fn strafe_destination(
    center: Vec3,
    actor_position: Vec3,
    target_forward: Vec3,
    radius: f32,
    strafe_dir: f32,
    tangent_offset: f32,
) -> Vec3 {
    let from_center = actor_position - center;
    let radial = if from_center.length_squared() > STRAFE_RADIAL_EPSILON_SQ {
        from_center.normalize()
    } else {
        -target_forward
    };

    let tangent = Vec3::Y.cross(radial).normalize_or_zero() * strafe_dir;

    center + radial * radius + tangent * tangent_offset
}

/// Project onto the ground plane (gravity axis removed).
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Yaw-only rotation whose forward (-Z) points along `direction` (flattened).
pub fn yaw_facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}

/// Rotate `current` toward facing `to_target` by at most `max_turn_deg_per_sec * dt`.
///
/// Returns `None` when the horizontal direction is degenerate (цель прямо
/// над/под актором) — в этот тик поворота нет.
pub fn rotate_towards(current: Quat, to_target: Vec3, max_turn_deg_per_sec: f32, dt: f32) -> Option<Quat> {
    let flat = flatten(to_target);
    if flat.length_squared() < ROTATION_EPSILON_SQ {
        return None;
    }

    let target = yaw_facing(flat.normalize());
    let max_step = max_turn_deg_per_sec.to_radians() * dt.max(0.0);
    let angle = current.angle_between(target);

    if angle <= max_step {
        Some(target)
    } else {
        Some(current.slerp(target, max_step / angle))
    }
}

/// cos(angle) between the actor's forward and the direction to `target`.
pub fn facing_dot(actor: &Transform, target: Vec3) -> f32 {
    let to_target = (target - actor.translation).normalize_or_zero();
    actor.forward().as_vec3().dot(to_target)
}
