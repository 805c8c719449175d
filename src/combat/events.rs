//! Combat events handed to the presentation layer after each tick

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::combat::weapons::ProjectileKind;
use crate::core::types::{ModuleId, ProjectileId, ShipId, Tick};

/// Why a projectile left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Lifetime cap reached
    Expired,
    /// Hit-test resolved to the firer's own fleet
    FriendlyFire,
    /// Beam delivered its whole length
    Spent,
    /// Missile reached its target
    Impact,
    /// Beam passed beyond its weapon's range
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventKind {
    ProjectileFired {
        projectile: ProjectileId,
        kind: ProjectileKind,
        source: ModuleId,
        target: ModuleId,
    },
    BeamDamage {
        projectile: ProjectileId,
        module: ModuleId,
        damage: f32,
    },
    /// Cosmetic, rate limited per beam
    ImpactEffect {
        projectile: ProjectileId,
        point: Vec3,
    },
    MissileDetonated {
        projectile: ProjectileId,
        module: Option<ModuleId>,
        point: Vec3,
        damage: f32,
    },
    FriendlyFireBlocked {
        projectile: ProjectileId,
        module: ModuleId,
    },
    ModuleDestroyed {
        module: ModuleId,
        ship: ShipId,
    },
    ProjectileTerminated {
        projectile: ProjectileId,
        reason: TerminationReason,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub tick: Tick,
    pub kind: CombatEventKind,
}

/// Log of events from a single tick
#[derive(Debug, Clone, Default)]
pub struct CombatEventLog {
    pub tick: Tick,
    pub events: Vec<CombatEvent>,
}

impl CombatEventLog {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: CombatEventKind) {
        self.events.push(CombatEvent {
            tick: self.tick,
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEventKind> + '_ {
        self.events.iter().map(|e| &e.kind)
    }

    /// Total damage dealt this tick by beams and missiles
    pub fn damage_dealt(&self) -> f32 {
        self.iter()
            .map(|kind| match kind {
                CombatEventKind::BeamDamage { damage, .. }
                | CombatEventKind::MissileDetonated { damage, .. } => *damage,
                _ => 0.0,
            })
            .sum()
    }

    pub fn terminations(&self) -> impl Iterator<Item = (ProjectileId, TerminationReason)> + '_ {
        self.iter().filter_map(|kind| match kind {
            CombatEventKind::ProjectileTerminated { projectile, reason } => {
                Some((*projectile, *reason))
            }
            _ => None,
        })
    }

    pub fn extend(&mut self, other: CombatEventLog) {
        self.events.extend(other.events);
    }
}
