//! Combat configuration with documented constants
//!
//! Defaults come from `combat::constants`. A config is built once per session
//! and handed to the kernel; there is no process-wide instance.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::capability::EngineSpeedRule;
use crate::combat::constants::*;
use crate::core::error::{CombatError, Result};

/// Configuration for projectile resolution and aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === BEAMS ===
    /// Age after which a beam is returned to the pool regardless of state
    pub beam_lifetime: f32,

    /// Total length of beam a single shot emits (world units)
    ///
    /// Damage is delivered in proportion to the fraction of this length that
    /// flows into a target, so the whole beam is worth exactly one shot.
    pub beam_max_length: f32,

    /// Minimum spacing between cosmetic impact effects of one beam
    ///
    /// Beams in contact produce damage every tick; effects are rate limited
    /// so the presentation layer is not flooded.
    pub beam_effect_interval: f32,

    // === MISSILES ===
    /// Age after which a missile self-destructs without damage
    pub missile_lifetime: f32,

    /// Distance to the target position that counts as a hit
    pub missile_hit_radius: f32,

    /// Lower bound of the randomized launch phase
    pub missile_launch_min: f32,

    /// Upper bound of the randomized launch phase
    pub missile_launch_max: f32,

    /// Speed floor as a fraction of base speed when facing away from the target
    pub missile_min_speed_factor: f32,

    /// Maximum heading change per time unit (radians)
    pub missile_turn_rate: f32,

    /// Apply the fleet-equality guard to missiles as well as beams
    pub missile_friendly_fire_guard: bool,

    // === AGGREGATION ===
    /// How live engines combine into a ship's speed
    pub engine_speed_rule: EngineSpeedRule,

    // === RESOURCES ===
    /// Maximum number of idle projectiles each pool retains
    pub pool_capacity: usize,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            beam_lifetime: BEAM_LIFETIME,
            beam_max_length: BEAM_MAX_LENGTH,
            beam_effect_interval: BEAM_EFFECT_INTERVAL,

            missile_lifetime: MISSILE_LIFETIME,
            missile_hit_radius: MISSILE_HIT_RADIUS,
            missile_launch_min: MISSILE_LAUNCH_MIN,
            missile_launch_max: MISSILE_LAUNCH_MAX,
            missile_min_speed_factor: MISSILE_MIN_SPEED_FACTOR,
            missile_turn_rate: MISSILE_TURN_RATE,
            missile_friendly_fire_guard: true,

            engine_speed_rule: EngineSpeedRule::Sum,

            pool_capacity: PROJECTILE_POOL_CAPACITY,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded combat config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("beam_lifetime", self.beam_lifetime),
            ("beam_max_length", self.beam_max_length),
            ("beam_effect_interval", self.beam_effect_interval),
            ("missile_lifetime", self.missile_lifetime),
            ("missile_hit_radius", self.missile_hit_radius),
            ("missile_launch_min", self.missile_launch_min),
            ("missile_launch_max", self.missile_launch_max),
            ("missile_min_speed_factor", self.missile_min_speed_factor),
            ("missile_turn_rate", self.missile_turn_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CombatError::InvalidConfig(format!(
                    "{} must be finite (got {})",
                    name, value
                )));
            }
        }

        let positive = [
            ("beam_lifetime", self.beam_lifetime),
            ("beam_max_length", self.beam_max_length),
            ("missile_lifetime", self.missile_lifetime),
            ("missile_hit_radius", self.missile_hit_radius),
            ("missile_turn_rate", self.missile_turn_rate),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(CombatError::InvalidConfig(format!(
                    "{} must be positive (got {})",
                    name, value
                )));
            }
        }

        if self.beam_effect_interval < 0.0 {
            return Err(CombatError::InvalidConfig(
                "beam_effect_interval must not be negative".into(),
            ));
        }

        if self.missile_launch_min < 0.0 || self.missile_launch_min > self.missile_launch_max {
            return Err(CombatError::InvalidConfig(format!(
                "missile launch window [{}, {}] is not ordered",
                self.missile_launch_min, self.missile_launch_max
            )));
        }

        if !(0.0..=1.0).contains(&self.missile_min_speed_factor) {
            return Err(CombatError::InvalidConfig(format!(
                "missile_min_speed_factor ({}) must be within [0, 1]",
                self.missile_min_speed_factor
            )));
        }

        if self.pool_capacity > MAX_POOL_CAPACITY {
            return Err(CombatError::InvalidConfig(format!(
                "pool_capacity ({}) exceeds {}",
                self.pool_capacity, MAX_POOL_CAPACITY
            )));
        }

        Ok(())
    }
}
