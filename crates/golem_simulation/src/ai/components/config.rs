//! Boss AI configuration (immutable после конструирования).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::state::BehaviorState;
use crate::ai::error::{ensure_non_negative, ensure_positive, ConfigError};
use crate::navigation::NavSettings;
use crate::perception::LosConfig;

/// Distance bands with hysteresis.
///
/// Strafe iff `mid_enter - hysteresis <= distance <= far_enter + hysteresis`,
/// otherwise chase (далеко — догоняем, близко — догоняем и решаем атаку).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct DistanceGates {
    /// Верхняя граница среднего кольца.
    pub far_enter: f32,
    /// Нижняя граница среднего кольца.
    pub mid_enter: f32,
    /// Запас против дребезга на границах.
    pub hysteresis: f32,
}

impl Default for DistanceGates {
    fn default() -> Self {
        Self {
            far_enter: 8.0,
            mid_enter: 4.0,
            hysteresis: 0.5,
        }
    }
}

impl DistanceGates {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("gates.far_enter", self.far_enter)?;
        ensure_non_negative("gates.mid_enter", self.mid_enter)?;
        ensure_non_negative("gates.hysteresis", self.hysteresis)?;

        if self.far_enter <= self.mid_enter {
            return Err(ConfigError::InvalidGates {
                far_enter: self.far_enter,
                mid_enter: self.mid_enter,
            });
        }
        Ok(())
    }

    /// Locomotion state for `distance` (never `Attacking`/`Recover`).
    pub fn choose(&self, distance: f32) -> BehaviorState {
        if distance > self.far_enter + self.hysteresis {
            return BehaviorState::Chase;
        }
        if distance < self.mid_enter - self.hysteresis {
            return BehaviorState::Chase;
        }
        BehaviorState::Strafe
    }
}

/// Orbit parameters for `Strafe`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrafeConfig {
    /// Радиус удержания вокруг цели.
    pub desired_mid_radius: f32,
    /// Период смены направления обхода (секунды).
    pub switch_interval: f32,
    /// Tangential push along the ring (метры).
    pub tangent_offset: f32,
}

impl Default for StrafeConfig {
    fn default() -> Self {
        Self {
            desired_mid_radius: 5.0,
            switch_interval: 3.0,
            tangent_offset: 1.0,
        }
    }
}

/// Full boss AI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub gates: DistanceGates,
    pub strafe: StrafeConfig,
    /// Min seconds between attack decision passes.
    pub decision_interval: f32,
    /// Максимальная скорость поворота (градусы/сек).
    pub max_turn_speed_deg: f32,
    /// Chase lead: destination = target + velocity * lead_time.
    pub lead_time: f32,
    /// `IsWalking` animator flag threshold (m/s).
    pub walk_speed_threshold: f32,
    pub los: LosConfig,
    pub nav: NavSettings,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            gates: DistanceGates::default(),
            strafe: StrafeConfig::default(),
            decision_interval: 0.2,
            max_turn_speed_deg: 360.0,
            lead_time: 0.2,
            walk_speed_threshold: 0.1,
            los: LosConfig::default(),
            nav: NavSettings::default(),
        }
    }
}

impl BossConfig {
    /// Parse from JSON (missing fields take defaults) and validate.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BossConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gates.validate()?;

        ensure_non_negative("strafe.desired_mid_radius", self.strafe.desired_mid_radius)?;
        ensure_positive("strafe.switch_interval", self.strafe.switch_interval)?;
        ensure_non_negative("strafe.tangent_offset", self.strafe.tangent_offset)?;

        ensure_positive("decision_interval", self.decision_interval)?;
        ensure_non_negative("max_turn_speed_deg", self.max_turn_speed_deg)?;
        ensure_non_negative("lead_time", self.lead_time)?;
        ensure_non_negative("walk_speed_threshold", self.walk_speed_threshold)?;

        self.los.validate()?;
        self.nav.validate()
    }
}
