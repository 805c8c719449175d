//! Ship modules - the destructible parts a ship is built from

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::combat::weapons::WeaponStats;
use crate::core::types::ModuleId;

/// What a module does for its ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleKind {
    Body { cargo: f32 },
    Engine { thrust: f32 },
    Weapon(WeaponStats),
    Hanger { cargo: f32 },
}

impl ModuleKind {
    pub fn weapon(&self) -> Option<&WeaponStats> {
        match self {
            ModuleKind::Weapon(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, ModuleKind::Engine { .. })
    }

    /// Cargo contributed by body and hanger modules
    pub fn cargo(&self) -> f32 {
        match self {
            ModuleKind::Body { cargo } | ModuleKind::Hanger { cargo } => *cargo,
            _ => 0.0,
        }
    }

    pub fn thrust(&self) -> f32 {
        match self {
            ModuleKind::Engine { thrust } => *thrust,
            _ => 0.0,
        }
    }
}

/// Outcome of applying damage to a module
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed (never more than the module had)
    pub applied: f32,
    /// True only on the hit that took the module to zero
    pub destroyed: bool,
}

/// A destructible sub-component of a ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    /// Blueprint/subtype name, e.g. "laser_mk2"
    pub subtype: String,
    pub kind: ModuleKind,
    pub health: f32,
    pub health_max: f32,
    /// Position relative to the owning ship's origin
    #[serde(default)]
    pub offset: Vec3,
}

impl Module {
    /// Create an undamaged module
    pub fn new(id: ModuleId, subtype: impl Into<String>, kind: ModuleKind, health_max: f32) -> Self {
        Self {
            id,
            subtype: subtype.into(),
            kind,
            health: health_max,
            health_max,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.health_max > 0.0 {
            (self.health / self.health_max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply damage, clamping health at zero
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() || amount <= 0.0 {
            return DamageOutcome {
                applied: 0.0,
                destroyed: false,
            };
        }
        let applied = amount.min(self.health);
        self.health -= applied;
        if self.health <= 0.0 {
            self.health = 0.0;
        }
        DamageOutcome {
            applied,
            destroyed: self.health == 0.0,
        }
    }

    /// Restore to full health
    pub fn repair(&mut self) {
        self.health = self.health_max;
    }
}
