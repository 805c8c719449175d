//! Missile resolution
//!
//! Missiles fly their launch direction for a short randomized launch phase,
//! then turn toward the target at a fixed angular rate. Speed collapses when
//! the nose points away from the target, so a missile turns before it
//! accelerates. All damage is delivered in a single detonation.

use glam::{Quat, Vec3};

use crate::combat::events::{CombatEventKind, TerminationReason};
use crate::combat::pool::Poolable;
use crate::combat::projectile::{TickContext, Tracking};
use crate::combat::weapons::WeaponStats;
use crate::core::types::{ModuleId, ProjectileId};

/// Fraction of base speed for a given heading error
///
/// `forward` and `desired` are unit vectors. Facing away from the target
/// (negative dot product) gives the floor.
pub fn speed_factor(forward: Vec3, desired: Vec3, min_factor: f32) -> f32 {
    let alignment = forward.dot(desired).max(0.0);
    (alignment * alignment).max(min_factor)
}

/// Rotate `from` toward `to` by at most `max_angle` radians
pub fn rotate_towards(from: Vec3, to: Vec3, max_angle: f32) -> Vec3 {
    let angle = from.angle_between(to);
    if angle <= max_angle {
        return to;
    }
    let axis = from
        .cross(to)
        .try_normalize()
        .unwrap_or_else(|| from.any_orthonormal_vector());
    (Quat::from_axis_angle(axis, max_angle) * from).normalize()
}

#[derive(Debug, Clone, Default)]
pub struct Missile {
    pub id: ProjectileId,
    pub source: ModuleId,
    tracking: Tracking,
    position: Vec3,
    forward: Vec3,
    launch_direction: Vec3,
    launch_duration: f32,
    base_speed: f32,
    current_speed: f32,
    damage: f32,
    age: f32,
    travelled: f32,
}

impl Poolable for Missile {
    fn reset(&mut self) {
        *self = Missile::default();
    }
}

impl Missile {
    /// Initialise a pooled missile for a new launch
    #[allow(clippy::too_many_arguments)]
    pub fn arm(
        &mut self,
        id: ProjectileId,
        source: ModuleId,
        target: ModuleId,
        origin: Vec3,
        launch_direction: Vec3,
        target_position: Vec3,
        weapon: &WeaponStats,
        launch_duration: f32,
    ) {
        let launch_direction = launch_direction.try_normalize().unwrap_or(Vec3::Z);
        *self = Missile {
            id,
            source,
            tracking: Tracking::new(target, target_position),
            position: origin,
            forward: launch_direction,
            launch_direction,
            launch_duration,
            base_speed: weapon.speed,
            damage: weapon.damage_per_shot,
            ..Default::default()
        };
    }

    pub fn target(&self) -> ModuleId {
        self.tracking.target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Speed used on the most recent tick
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn launch_duration(&self) -> f32 {
        self.launch_duration
    }

    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    pub fn advance(&mut self, dt: f32, ctx: &mut TickContext<'_>) -> Option<TerminationReason> {
        self.age += dt;
        if self.age > ctx.config.missile_lifetime {
            return Some(TerminationReason::Expired);
        }

        let aim = self.tracking.aim(ctx.armada);
        if self.position.distance(aim) < ctx.config.missile_hit_radius {
            return Some(self.detonate(aim, ctx));
        }

        let desired = (aim - self.position).try_normalize().unwrap_or(self.forward);
        if self.age <= self.launch_duration {
            self.forward = self.launch_direction;
        } else {
            self.forward =
                rotate_towards(self.forward, desired, ctx.config.missile_turn_rate * dt);
        }

        self.current_speed = self.base_speed
            * speed_factor(self.forward, desired, ctx.config.missile_min_speed_factor);
        let step = self.current_speed * dt;
        self.position += self.forward * step;
        self.travelled += step;

        if self.position.distance(aim) < ctx.config.missile_hit_radius {
            return Some(self.detonate(aim, ctx));
        }
        None
    }

    fn detonate(&mut self, point: Vec3, ctx: &mut TickContext<'_>) -> TerminationReason {
        let target = self.tracking.target;
        if ctx.config.missile_friendly_fire_guard && ctx.armada.same_fleet(self.source, target) {
            tracing::debug!("{} blocked by friendly {}", self.id, target);
            ctx.events.push(CombatEventKind::FriendlyFireBlocked {
                projectile: self.id,
                module: target,
            });
            return TerminationReason::FriendlyFire;
        }

        if self.tracking.target_alive(ctx.armada) {
            let damage = std::mem::take(&mut self.damage);
            ctx.deal_damage(target, damage);
            ctx.events.push(CombatEventKind::MissileDetonated {
                projectile: self.id,
                module: Some(target),
                point,
                damage,
            });
        } else {
            // Target died in flight; the warhead goes off over empty space
            ctx.events.push(CombatEventKind::MissileDetonated {
                projectile: self.id,
                module: None,
                point,
                damage: 0.0,
            });
        }
        TerminationReason::Impact
    }
}
