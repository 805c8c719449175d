//! Capability aggregation over modules, ships and fleets
//!
//! Every query is a pure read of module state. Both bases count only live
//! modules: the original basis at `health_max`, the current basis at their
//! present health.

use serde::{Deserialize, Serialize};

use crate::capability::profile::CapabilityProfile;
use crate::fleet::{Fleet, Module, ModuleKind, Ship};

/// How live engines combine into a ship's speed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineSpeedRule {
    /// Thrust of every engine adds up
    #[default]
    Sum,
    /// Only the strongest engine counts
    Max,
}

/// Which module state a profile is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileBasis {
    /// Live modules at `health_max`
    Original,
    /// Damage-adjusted: live modules at `health`
    Current,
}

/// Sums module contributions into profiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregator {
    pub speed_rule: EngineSpeedRule,
}

impl Aggregator {
    pub fn new(speed_rule: EngineSpeedRule) -> Self {
        Self { speed_rule }
    }

    /// Contribution of a single module; zero for a dead module on either basis
    pub fn module(&self, module: &Module, basis: ProfileBasis) -> CapabilityProfile {
        if !module.is_alive() {
            return CapabilityProfile::default();
        }
        let hp = match basis {
            ProfileBasis::Original => module.health_max,
            ProfileBasis::Current => module.health,
        };

        let mut profile = CapabilityProfile {
            hp,
            cargo: module.kind.cargo(),
            ..Default::default()
        };
        match &module.kind {
            ModuleKind::Weapon(stats) => {
                profile.attack_dps = stats.dps();
                profile.weapon_count = 1;
            }
            ModuleKind::Engine { thrust } => {
                profile.speed = *thrust;
                profile.engine_count = 1;
            }
            ModuleKind::Body { .. } | ModuleKind::Hanger { .. } => {}
        }
        profile
    }

    pub fn ship(&self, ship: &Ship, basis: ProfileBasis) -> CapabilityProfile {
        let mut total = CapabilityProfile::default();
        let mut fastest = 0.0_f32;
        for module in &ship.modules {
            let contribution = self.module(module, basis);
            fastest = fastest.max(contribution.speed);
            total += contribution;
        }
        if self.speed_rule == EngineSpeedRule::Max {
            total.speed = fastest;
        }
        total
    }

    /// Elementwise sum of the fleet's ship profiles
    pub fn fleet(&self, fleet: &Fleet, basis: ProfileBasis) -> CapabilityProfile {
        fleet.ships.iter().map(|ship| self.ship(ship, basis)).sum()
    }
}
