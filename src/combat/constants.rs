//! Combat tuning constants - all default values in one place
//!
//! Time values are in simulation time units (seconds), distances in world units.

// Beam constants
pub const BEAM_LIFETIME: f32 = 5.0;
pub const BEAM_MAX_LENGTH: f32 = 10.0;
pub const BEAM_EFFECT_INTERVAL: f32 = 1.0;

// Missile constants
pub const MISSILE_LIFETIME: f32 = 10.0;
pub const MISSILE_HIT_RADIUS: f32 = 1.0;
pub const MISSILE_LAUNCH_MIN: f32 = 0.1;
pub const MISSILE_LAUNCH_MAX: f32 = 0.5;
pub const MISSILE_MIN_SPEED_FACTOR: f32 = 0.1;
/// Radians per time unit
pub const MISSILE_TURN_RATE: f32 = std::f32::consts::PI;

// World constants
pub const MODULE_COLLIDER_RADIUS: f32 = 1.0;

// Pool constants
pub const PROJECTILE_POOL_CAPACITY: usize = 256;

/// Upper bound accepted for a configured pool capacity
pub const MAX_POOL_CAPACITY: usize = 1 << 20;
