//! Configuration errors.
//!
//! Boss AI config is validated once at construction. Any violation here is a
//! content/authoring bug, so `BossController::new` refuses to build instead of
//! limping along with broken gates or ranges.

/// Errors raised while validating or loading boss AI configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `far_enter` must be strictly greater than `mid_enter`.
    #[error("distance gates invalid: far_enter ({far_enter}) must be > mid_enter ({mid_enter})")]
    InvalidGates { far_enter: f32, mid_enter: f32 },

    /// A value that must be ≥ 0 (and finite) is not.
    #[error("{field} must be finite and >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// A value that must be > 0 (and finite) is not.
    #[error("{field} must be finite and > 0, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Attack range is inverted or non-finite.
    #[error("attack '{attack}': max_range ({max_range}) must be >= min_range ({min_range})")]
    InvalidRange {
        attack: String,
        min_range: f32,
        max_range: f32,
    },

    #[error("attack '{attack}': cooldown must be > 0, got {cooldown}")]
    InvalidCooldown { attack: String, cooldown: f32 },

    #[error("attack '{attack}': weight must be >= 0, got {weight}")]
    InvalidWeight { attack: String, weight: f32 },

    #[error("attack '{attack}': required_facing_dot must be in [-1, 1], got {dot}")]
    InvalidFacingDot { attack: String, dot: f32 },

    /// Keyframe curve is empty, unsorted or contains non-finite values.
    #[error("attack '{attack}': distance curve invalid ({reason})")]
    InvalidCurve { attack: String, reason: &'static str },

    /// JSON config could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// `value` must be finite and ≥ 0.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// `value` must be finite and > 0.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
