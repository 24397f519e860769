//! Navigation adapter: desired point → safe walkable destination.
//!
//! Navmesh/pathfinding живут снаружи (engine NavigationAgent); AI core использует
//! только контракт `NavigationService`.
//!
//! Правила:
//! - Актор не на navmesh → destination запросы молча игнорируются
//! - Sample успешен → идём в sampled точку
//! - Sample провалился → destination = текущая позиция (стоим), тик не падает

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::error::{ensure_non_negative, ConfigError};

pub mod flat;

pub use flat::{advance_boss_navigation, FlatNavAgent, FlatNavMesh};

/// Navigation agent contract (one per actor).
pub trait NavigationService: Send + Sync {
    /// Nearest walkable point within `radius` of `point`, if any.
    fn sample_walkable(&self, point: Vec3, radius: f32) -> Option<Vec3>;
    fn set_destination(&mut self, point: Vec3);
    fn is_on_walkable_surface(&self) -> bool;
    fn current_velocity_magnitude(&self) -> f32;
    /// Locomotion off = agent stops and no longer drives the body.
    fn set_locomotion_enabled(&mut self, enabled: bool);
    /// Teleport the agent (startup snap onto the navmesh).
    fn warp(&mut self, point: Vec3);
    /// Re-sync the agent's internal position with the actor's transform.
    fn sync_position(&mut self, point: Vec3);
}

/// Sampling radii used by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// Radius for resolving per-tick destinations.
    pub sample_radius: f32,
    /// Radius for the one-time startup snap.
    pub snap_radius: f32,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            sample_radius: 1.5,
            snap_radius: 2.0,
        }
    }
}

impl NavSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("nav.sample_radius", self.sample_radius)?;
        ensure_non_negative("nav.snap_radius", self.snap_radius)
    }
}

/// Result of a destination request (для логов и тестов).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestinationOutcome {
    /// Agent off the navmesh; request dropped.
    Ignored,
    /// Destination set to the sampled walkable point.
    Moving(Vec3),
    /// Sampling failed; destination set to the actor's current position.
    Holding(Vec3),
}

/// Request `desired` as destination, resolving it onto the walkable surface.
pub fn set_destination_safe(
    nav: &mut impl NavigationService,
    desired: Vec3,
    current_position: Vec3,
    settings: &NavSettings,
) -> DestinationOutcome {
    if !nav.is_on_walkable_surface() {
        return DestinationOutcome::Ignored;
    }

    match nav.sample_walkable(desired, settings.sample_radius) {
        Some(point) => {
            nav.set_destination(point);
            DestinationOutcome::Moving(point)
        }
        None => {
            nav.set_destination(current_position);
            DestinationOutcome::Holding(current_position)
        }
    }
}

/// One-time startup correction: warp onto the nearest walkable point.
///
/// Returns the new position if a warp happened.
pub fn snap_onto_surface(
    nav: &mut impl NavigationService,
    position: Vec3,
    settings: &NavSettings,
) -> Option<Vec3> {
    if nav.is_on_walkable_surface() {
        return None;
    }

    let point = nav.sample_walkable(position, settings.snap_radius)?;
    nav.warp(point);
    Some(point)
}
