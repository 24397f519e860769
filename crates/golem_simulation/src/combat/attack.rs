//! Attack descriptors — одна запись на каждую атаку босса.
//!
//! Все атаки одной формы (tagged data), поэтому каталог — плоский arena
//! `Vec<AttackDescriptor>`, индексируемый `AttackId`. Mutable только
//! `last_used` (обновляется ровно один раз на каждый успешный выбор).

use serde::{Deserialize, Serialize};

use crate::ai::error::{ConfigError, ensure_non_negative};
use crate::animation::AnimTrigger;

/// Position of a descriptor in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttackId(pub usize);

/// Distance-response curve: normalized range [0,1] → score multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistanceCurve {
    /// Flat response (default: 1.0 everywhere).
    Constant(f32),
    /// Straight line from `start` at t=0 to `end` at t=1.
    Linear { start: f32, end: f32 },
    /// Piecewise-linear keyframes `(t, value)`, sorted by `t`; clamped at both ends.
    Keyframes(Vec<(f32, f32)>),
}

impl Default for DistanceCurve {
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

impl DistanceCurve {
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            DistanceCurve::Constant(value) => *value,
            DistanceCurve::Linear { start, end } => start + (end - start) * t,
            DistanceCurve::Keyframes(keys) => evaluate_keyframes(keys, t),
        }
    }

    fn validate(&self, attack: &str) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidCurve {
            attack: attack.to_string(),
            reason,
        };

        match self {
            DistanceCurve::Constant(value) if !value.is_finite() => Err(invalid("non-finite value")),
            DistanceCurve::Linear { start, end } if !start.is_finite() || !end.is_finite() => {
                Err(invalid("non-finite value"))
            }
            DistanceCurve::Keyframes(keys) => {
                if keys.is_empty() {
                    return Err(invalid("no keyframes"));
                }
                if keys.iter().any(|(t, v)| !t.is_finite() || !v.is_finite()) {
                    return Err(invalid("non-finite keyframe"));
                }
                if keys.windows(2).any(|pair| pair[1].0 < pair[0].0) {
                    return Err(invalid("keyframes not sorted by t"));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn evaluate_keyframes(keys: &[(f32, f32)], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };

    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }

    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t >= t0 && t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * ((t - t0) / span);
        }
    }

    last.1
}

/// One selectable attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackDescriptor {
    pub name: String,
    /// Animator trigger fired when this attack is selected.
    pub trigger: AnimTrigger,
    pub min_range: f32,
    pub max_range: f32,
    /// Секунды между использованиями.
    pub cooldown: f32,
    pub weight: f32,
    #[serde(default)]
    pub distance_curve: DistanceCurve,
    #[serde(default)]
    pub requires_los: bool,
    /// -1 = facing irrelevant, 0 ≈ within 90° in front, 1 = dead ahead.
    #[serde(default)]
    pub required_facing_dot: f32,

    /// Simulation time of the last selection; `None` = never used.
    #[serde(skip)]
    pub last_used: Option<f32>,
}

impl AttackDescriptor {
    /// Descriptor with neutral scoring: flat curve, no LOS, facing within 90°.
    pub fn new(
        name: impl Into<String>,
        trigger: AnimTrigger,
        min_range: f32,
        max_range: f32,
        cooldown: f32,
        weight: f32,
    ) -> Self {
        Self {
            name: name.into(),
            trigger,
            min_range,
            max_range,
            cooldown,
            weight,
            distance_curve: DistanceCurve::default(),
            requires_los: false,
            required_facing_dot: 0.0,
            last_used: None,
        }
    }

    pub fn with_curve(mut self, curve: DistanceCurve) -> Self {
        self.distance_curve = curve;
        self
    }

    pub fn with_facing_dot(mut self, dot: f32) -> Self {
        self.required_facing_dot = dot;
        self
    }

    pub fn requiring_los(mut self) -> Self {
        self.requires_los = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("attack.min_range", self.min_range)?;

        if !self.max_range.is_finite() || self.max_range < self.min_range {
            return Err(ConfigError::InvalidRange {
                attack: self.name.clone(),
                min_range: self.min_range,
                max_range: self.max_range,
            });
        }
        if !self.cooldown.is_finite() || self.cooldown <= 0.0 {
            return Err(ConfigError::InvalidCooldown {
                attack: self.name.clone(),
                cooldown: self.cooldown,
            });
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                attack: self.name.clone(),
                weight: self.weight,
            });
        }
        if !(-1.0..=1.0).contains(&self.required_facing_dot) {
            return Err(ConfigError::InvalidFacingDot {
                attack: self.name.clone(),
                dot: self.required_facing_dot,
            });
        }

        self.distance_curve.validate(&self.name)
    }

    pub fn is_in_range(&self, distance: f32) -> bool {
        distance >= self.min_range && distance <= self.max_range
    }

    /// Position of `distance` inside `[min_range, max_range]`, clamped to [0,1].
    pub fn normalized_range(&self, distance: f32) -> f32 {
        if self.max_range <= self.min_range {
            return 1.0;
        }
        ((distance - self.min_range) / (self.max_range - self.min_range)).clamp(0.0, 1.0)
    }

    pub fn is_off_cooldown(&self, now: f32) -> bool {
        match self.last_used {
            Some(last) => now >= last + self.cooldown,
            None => true,
        }
    }

    /// Ramp 0.25 → 1.0 over the cooldown window after last use.
    pub fn cooldown_factor(&self, now: f32) -> f32 {
        let Some(last) = self.last_used else {
            return 1.0;
        };
        let t = ((now - last) / self.cooldown).clamp(0.0, 1.0);
        0.25 + (1.0 - 0.25) * t
    }

    pub fn mark_used(&mut self, now: f32) {
        self.last_used = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slam() -> AttackDescriptor {
        AttackDescriptor::new("slam", AnimTrigger::new("Slam"), 2.0, 6.0, 3.0, 1.0)
    }

    #[test]
    fn test_normalized_range() {
        let attack = slam();
        assert_eq!(attack.normalized_range(2.0), 0.0);
        assert_eq!(attack.normalized_range(4.0), 0.5);
        assert_eq!(attack.normalized_range(10.0), 1.0);
        assert_eq!(attack.normalized_range(0.0), 0.0);

        let point = AttackDescriptor::new("point", AnimTrigger::new("P"), 3.0, 3.0, 1.0, 1.0);
        assert_eq!(point.normalized_range(3.0), 1.0);
    }

    #[test]
    fn test_range_is_inclusive() {
        let attack = slam();
        assert!(attack.is_in_range(2.0));
        assert!(attack.is_in_range(6.0));
        assert!(!attack.is_in_range(1.99));
        assert!(!attack.is_in_range(6.01));
    }

    #[test]
    fn test_cooldown_window() {
        let mut attack = slam();
        assert!(attack.is_off_cooldown(0.0));
        assert_eq!(attack.cooldown_factor(0.0), 1.0);

        attack.mark_used(10.0);
        assert!(!attack.is_off_cooldown(10.0));
        assert!(!attack.is_off_cooldown(12.9));
        assert!(attack.is_off_cooldown(13.0));

        assert_eq!(attack.cooldown_factor(10.0), 0.25);
        assert!((attack.cooldown_factor(11.5) - 0.625).abs() < 1e-5);
        assert_eq!(attack.cooldown_factor(20.0), 1.0);
    }

    #[test]
    fn test_curves() {
        assert_eq!(DistanceCurve::default().evaluate(0.3), 1.0);

        let linear = DistanceCurve::Linear { start: 0.0, end: 2.0 };
        assert_eq!(linear.evaluate(0.5), 1.0);
        assert_eq!(linear.evaluate(5.0), 2.0);

        let keys = DistanceCurve::Keyframes(vec![(0.2, 0.0), (0.5, 1.0), (1.0, 0.5)]);
        assert_eq!(keys.evaluate(0.0), 0.0);
        assert!((keys.evaluate(0.35) - 0.5).abs() < 1e-5);
        assert!((keys.evaluate(0.75) - 0.75).abs() < 1e-5);
        assert_eq!(keys.evaluate(1.0), 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_descriptors() {
        assert!(slam().validate().is_ok());

        let mut inverted = slam();
        inverted.max_range = 1.0;
        assert!(matches!(inverted.validate(), Err(ConfigError::InvalidRange { .. })));

        let mut no_cooldown = slam();
        no_cooldown.cooldown = 0.0;
        assert!(matches!(no_cooldown.validate(), Err(ConfigError::InvalidCooldown { .. })));

        let mut negative_weight = slam();
        negative_weight.weight = -1.0;
        assert!(matches!(negative_weight.validate(), Err(ConfigError::InvalidWeight { .. })));

        let facing = slam().with_facing_dot(1.5);
        assert!(matches!(facing.validate(), Err(ConfigError::InvalidFacingDot { .. })));

        let unsorted = slam().with_curve(DistanceCurve::Keyframes(vec![(0.8, 1.0), (0.2, 0.0)]));
        assert!(matches!(unsorted.validate(), Err(ConfigError::InvalidCurve { .. })));

        let empty = slam().with_curve(DistanceCurve::Keyframes(Vec::new()));
        assert!(matches!(empty.validate(), Err(ConfigError::InvalidCurve { .. })));
    }
}
