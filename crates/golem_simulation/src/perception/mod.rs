//! Perception gate — line-of-sight (LOS) для решений об атаке.
//!
//! Fail-open политика:
//! - LOS выключен → цель видна
//! - LOS включен, но нет глаза (eye_offset = None) → цель видна
//! - Иначе: eye → голова цели, дальность ограничена `max_distance`,
//!   видимость = raycast не упёрся в блокирующий слой (триггеры игнорируются)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::error::{ensure_non_negative, ConfigError};

pub mod occluders;

pub use occluders::{BoxOccluder, OccluderSet};

// ============================================================================
// Layer битовые маски (на каком слое находится окклюдер)
// ============================================================================

/// Layer 2: Actors
pub const LAYER_ACTORS: u32 = 0b10;

/// Layer 3: Environment (walls, pillars, terrain)
pub const LAYER_ENVIRONMENT: u32 = 0b100;

/// Default LOS block mask: only environment blocks sight.
pub const LOS_BLOCK_MASK_DEFAULT: u32 = LAYER_ENVIRONMENT;

/// Occlusion query supplied by the physics world.
pub trait OcclusionQuery: Send + Sync {
    /// `true` if a non-trigger surface on `block_mask` intersects the segment
    /// `from → to` within `max_distance` of `from`.
    fn raycast_blocked(&self, from: Vec3, to: Vec3, max_distance: f32, block_mask: u32) -> bool;
}

/// LOS configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LosConfig {
    pub enabled: bool,
    pub block_mask: u32,
    pub max_distance: f32,
    /// Eye point in actor-local space. `None` = no eye, LOS always passes.
    pub eye_offset: Option<[f32; 3]>,
    /// Target point is raised by this much above the target origin (голова).
    pub target_head_height: f32,
}

impl Default for LosConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            block_mask: LOS_BLOCK_MASK_DEFAULT,
            max_distance: 40.0,
            eye_offset: None,
            target_head_height: 1.0,
        }
    }
}

impl LosConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("los.max_distance", self.max_distance)?;
        ensure_non_negative("los.target_head_height", self.target_head_height)
    }

    pub fn eye_offset(&self) -> Option<Vec3> {
        self.eye_offset.map(Vec3::from_array)
    }
}

/// Does the actor currently see `target_position`?
pub fn has_line_of_sight(
    config: &LosConfig,
    actor: &Transform,
    target_position: Vec3,
    occlusion: &impl OcclusionQuery,
) -> bool {
    if !config.enabled {
        return true;
    }
    let Some(eye_offset) = config.eye_offset() else {
        return true;
    };

    let eye = actor.transform_point(eye_offset);
    let head = target_position + Vec3::Y * config.target_head_height;
    let distance = (head - eye).length();

    if distance > config.max_distance {
        return false;
    }

    !occlusion.raycast_blocked(eye, head, distance, config.block_mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_between() -> OccluderSet {
        // стена на x ∈ [4, 5], высокая
        OccluderSet::new(vec![BoxOccluder::new(
            Vec3::new(4.0, 0.0, -5.0),
            Vec3::new(5.0, 4.0, 5.0),
            LAYER_ENVIRONMENT,
        )])
    }

    fn enabled() -> LosConfig {
        LosConfig {
            enabled: true,
            eye_offset: Some([0.0, 1.5, 0.0]),
            ..default()
        }
    }

    #[test]
    fn test_disabled_is_visible() {
        let config = LosConfig::default();
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(10.0, 0.0, 0.0), &wall_between()));
    }

    #[test]
    fn test_missing_eye_fails_open() {
        let config = LosConfig {
            enabled: true,
            eye_offset: None,
            ..default()
        };
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(10.0, 0.0, 0.0), &wall_between()));
    }

    #[test]
    fn test_wall_blocks() {
        let config = enabled();
        assert!(!has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(10.0, 0.0, 0.0), &wall_between()));
        // цель перед стеной
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(3.0, 0.0, 0.0), &wall_between()));
    }

    #[test]
    fn test_mask_filters_layers() {
        let config = LosConfig {
            block_mask: LAYER_ACTORS,
            ..enabled()
        };
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(10.0, 0.0, 0.0), &wall_between()));
    }

    #[test]
    fn test_trigger_volume_ignored() {
        let config = enabled();
        let trigger = OccluderSet::new(vec![BoxOccluder::new(
            Vec3::new(4.0, 0.0, -5.0),
            Vec3::new(5.0, 4.0, 5.0),
            LAYER_ENVIRONMENT,
        )
        .as_trigger()]);
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(10.0, 0.0, 0.0), &trigger));
    }

    #[test]
    fn test_beyond_max_distance() {
        let config = LosConfig {
            max_distance: 5.0,
            ..enabled()
        };
        let empty = OccluderSet::default();
        assert!(!has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(8.0, 0.0, 0.0), &empty));
        assert!(has_line_of_sight(&config, &Transform::IDENTITY, Vec3::new(3.0, 0.0, 0.0), &empty));
    }
}
