//! Weapon attributes carried by weapon modules
//!
//! Four projectile kinds exist, resolved by two behaviours: beams (hit-scan
//! segments that deliver damage per unit of length) and missiles (guided,
//! deliver everything on impact).

use serde::{Deserialize, Serialize};

/// Projectile a weapon fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Beam,
    Missile,
    Cannon,
    Torpedo,
}

/// How a projectile kind is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Beam,
    Missile,
}

impl ProjectileKind {
    /// Cannons travel as straight slugs, torpedoes are guided
    pub fn behavior(self) -> Behavior {
        match self {
            ProjectileKind::Beam | ProjectileKind::Cannon => Behavior::Beam,
            ProjectileKind::Missile | ProjectileKind::Torpedo => Behavior::Missile,
        }
    }
}

/// Complete weapon attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage_per_shot: f32,
    /// Time units between shots
    pub fire_interval: f32,
    pub projectile: ProjectileKind,
    /// Projectile speed (world units per time unit)
    pub speed: f32,
    /// Maximum engagement distance
    pub range: f32,
}

impl WeaponStats {
    /// Sustained damage per time unit; zero when the interval is not positive
    pub fn dps(&self) -> f32 {
        if self.fire_interval <= 0.0 {
            return 0.0;
        }
        self.damage_per_shot / self.fire_interval
    }

    /// Validate that the weapon can actually be fired
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("damage_per_shot", self.damage_per_shot),
            ("fire_interval", self.fire_interval),
            ("speed", self.speed),
            ("range", self.range),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{} must be finite (got {})", name, value));
            }
        }

        if self.damage_per_shot < 0.0 {
            return Err(format!(
                "damage_per_shot ({}) must not be negative",
                self.damage_per_shot
            ));
        }
        if self.fire_interval <= 0.0 {
            return Err(format!(
                "fire_interval ({}) must be positive",
                self.fire_interval
            ));
        }
        if self.speed <= 0.0 {
            return Err(format!("speed ({}) must be positive", self.speed));
        }
        if self.range <= 0.0 {
            return Err(format!("range ({}) must be positive", self.range));
        }
        Ok(())
    }

    /// Common weapon: Pulse laser
    pub fn laser() -> Self {
        Self {
            damage_per_shot: 10.0,
            fire_interval: 1.0,
            projectile: ProjectileKind::Beam,
            speed: 40.0,
            range: 60.0,
        }
    }

    /// Common weapon: Guided missile rack
    pub fn missile_rack() -> Self {
        Self {
            damage_per_shot: 40.0,
            fire_interval: 4.0,
            projectile: ProjectileKind::Missile,
            speed: 15.0,
            range: 120.0,
        }
    }

    /// Common weapon: Mass driver
    pub fn cannon() -> Self {
        Self {
            damage_per_shot: 25.0,
            fire_interval: 2.0,
            projectile: ProjectileKind::Cannon,
            speed: 30.0,
            range: 50.0,
        }
    }

    /// Common weapon: Heavy torpedo
    pub fn torpedo() -> Self {
        Self {
            damage_per_shot: 120.0,
            fire_interval: 10.0,
            projectile: ProjectileKind::Torpedo,
            speed: 8.0,
            range: 150.0,
        }
    }
}
