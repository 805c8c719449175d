//! Beam resolution
//!
//! A shot emits `max_length` of beam at `speed`. The head runs from the firer
//! toward the target; the tail leaves the emitter once the whole length is
//! out. When the tail→head sweep hits an enemy module the head pins to the
//! impact point and the beam drains into it, each unit of length worth
//! `total_damage / max_length`. Summed over the drain this is exactly one
//! shot's damage.

use glam::Vec3;

use crate::combat::events::{CombatEventKind, TerminationReason};
use crate::combat::pool::Poolable;
use crate::combat::projectile::{TickContext, Tracking};
use crate::combat::weapons::WeaponStats;
use crate::core::types::{ModuleId, ProjectileId};

const EPSILON: f32 = 1e-4;

/// Damage carried by `travel` units of a beam of length `max_length`
pub fn frame_damage(total_damage: f32, travel: f32, max_length: f32) -> f32 {
    if max_length <= 0.0 {
        return 0.0;
    }
    total_damage * (travel / max_length)
}

#[derive(Debug, Clone, Default)]
pub struct Beam {
    pub id: ProjectileId,
    pub source: ModuleId,
    tracking: Tracking,
    origin: Vec3,
    direction: Vec3,
    total_damage: f32,
    speed: f32,
    range: f32,
    max_length: f32,
    /// Distance of the head from the origin along `direction`
    head: f32,
    /// Length that has left the emitter
    emitted: f32,
    /// Length that has drained into targets
    absorbed: f32,
    age: f32,
    last_effect: Option<f32>,
    damage_dealt: f32,
}

impl Poolable for Beam {
    fn reset(&mut self) {
        *self = Beam::default();
    }
}

impl Beam {
    /// Initialise a pooled beam for a new shot
    #[allow(clippy::too_many_arguments)]
    pub fn arm(
        &mut self,
        id: ProjectileId,
        source: ModuleId,
        target: ModuleId,
        origin: Vec3,
        target_position: Vec3,
        weapon: &WeaponStats,
        max_length: f32,
    ) {
        *self = Beam {
            id,
            source,
            tracking: Tracking::new(target, target_position),
            origin,
            direction: (target_position - origin).try_normalize().unwrap_or(Vec3::Z),
            total_damage: weapon.damage_per_shot,
            speed: weapon.speed,
            range: weapon.range,
            max_length,
            ..Default::default()
        };
    }

    pub fn target(&self) -> ModuleId {
        self.tracking.target
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    /// Beam length still in flight
    pub fn remaining(&self) -> f32 {
        (self.emitted - self.absorbed).max(0.0)
    }

    pub fn emission_complete(&self) -> bool {
        self.emitted >= self.max_length - EPSILON
    }

    pub fn head_position(&self) -> Vec3 {
        self.origin + self.direction * self.head
    }

    pub fn tail_position(&self) -> Vec3 {
        self.origin + self.direction * (self.head - self.remaining()).max(0.0)
    }

    pub fn damage_dealt(&self) -> f32 {
        self.damage_dealt
    }

    pub fn advance(&mut self, dt: f32, ctx: &mut TickContext<'_>) -> Option<TerminationReason> {
        self.age += dt;
        if self.age > ctx.config.beam_lifetime {
            return Some(TerminationReason::Expired);
        }

        if let Some(position) = ctx
            .armada
            .module(self.source)
            .filter(|m| m.is_alive())
            .and_then(|_| ctx.armada.module_position(self.source))
        {
            self.origin = position;
        }
        let aim = self.tracking.aim(ctx.armada);
        if let Some(direction) = (aim - self.origin).try_normalize() {
            self.direction = direction;
        }

        // Emit first so a pinned beam always sweeps from outside its target
        let travel = self.speed * dt;
        self.emitted = (self.emitted + travel).min(self.max_length);
        let sweep_start = (self.head - self.remaining()).max(0.0);
        let reach = self.head + travel;

        let hit = ctx.world.cast(
            self.origin + self.direction * sweep_start,
            self.direction,
            reach - sweep_start,
        );

        let Some(hit) = hit else {
            self.head = reach;
            let tail = self.head - self.remaining();
            if tail > self.range {
                return Some(TerminationReason::OutOfRange);
            }
            return None;
        };

        if ctx.armada.same_fleet(self.source, hit.module) {
            tracing::debug!("{} blocked by friendly {}", self.id, hit.module);
            ctx.events.push(CombatEventKind::FriendlyFireBlocked {
                projectile: self.id,
                module: hit.module,
            });
            return Some(TerminationReason::FriendlyFire);
        }

        self.head = sweep_start + hit.distance;

        // The last sliver of a fully emitted beam drains in one go
        let drained = travel.min(self.remaining());
        self.absorbed += drained;
        let damage = frame_damage(self.total_damage, drained, self.max_length);
        if damage > 0.0 {
            self.damage_dealt += ctx.deal_damage(hit.module, damage);
            ctx.events.push(CombatEventKind::BeamDamage {
                projectile: self.id,
                module: hit.module,
                damage,
            });
        }

        let effect_due = self
            .last_effect
            .map_or(true, |at| self.age - at >= ctx.config.beam_effect_interval);
        if effect_due {
            self.last_effect = Some(self.age);
            ctx.events.push(CombatEventKind::ImpactEffect {
                projectile: self.id,
                point: hit.point,
            });
        }

        if self.emission_complete() && self.remaining() <= EPSILON {
            return Some(TerminationReason::Spent);
        }
        None
    }
}
