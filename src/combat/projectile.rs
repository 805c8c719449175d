//! Shared plumbing for projectile behaviours
//!
//! A projectile is advanced by an external scheduler once per tick through
//! `advance(dt, ctx) -> Option<TerminationReason>`. The context carries
//! everything it may touch during that call.

use glam::Vec3;

use crate::combat::events::{CombatEventKind, CombatEventLog};
use crate::core::config::CombatConfig;
use crate::core::types::ModuleId;
use crate::fleet::Armada;
use crate::world::HitScan;

pub struct TickContext<'a> {
    pub armada: &'a mut Armada,
    pub world: &'a dyn HitScan,
    pub config: &'a CombatConfig,
    pub events: &'a mut CombatEventLog,
}

impl<'a> TickContext<'a> {
    /// Apply damage to a module, reporting destruction; returns health removed
    pub fn deal_damage(&mut self, module: ModuleId, amount: f32) -> f32 {
        let Some(outcome) = self.armada.apply_damage(module, amount) else {
            tracing::warn!("Damage to unknown {} dropped", module);
            return 0.0;
        };
        if outcome.destroyed {
            if let Some(owner) = self.armada.module_owner(module) {
                tracing::info!("{} of {} destroyed", module, owner.ship);
                self.events.push(CombatEventKind::ModuleDestroyed {
                    module,
                    ship: owner.ship,
                });
            }
        }
        outcome.applied
    }
}

/// Target reference with a fallback position for when the target dies
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracking {
    pub target: ModuleId,
    pub last_known: Vec3,
}

impl Tracking {
    pub fn new(target: ModuleId, last_known: Vec3) -> Self {
        Self { target, last_known }
    }

    /// Current target position while it lives, otherwise where it was last seen
    pub fn aim(&mut self, armada: &Armada) -> Vec3 {
        if self.target_alive(armada) {
            if let Some(position) = armada.module_position(self.target) {
                self.last_known = position;
            }
        }
        self.last_known
    }

    pub fn target_alive(&self, armada: &Armada) -> bool {
        armada.module(self.target).is_some_and(|m| m.is_alive())
    }
}
