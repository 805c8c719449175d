//! Combat kernel - owns the armada, projectiles and pools for one session
//!
//! Everything the projectiles need is injected at construction: the world
//! collaborator, the config and the RNG seed. One `tick(dt)` refreshes the
//! world, runs standing orders, then advances every live projectile.

use ahash::AHashMap;
use glam::Vec3;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::beam::Beam;
use crate::combat::events::{CombatEventKind, CombatEventLog};
use crate::combat::missile::Missile;
use crate::combat::pool::{Pool, PoolStats};
use crate::combat::projectile::TickContext;
use crate::combat::weapons::Behavior;
use crate::core::config::CombatConfig;
use crate::core::error::{CombatError, Result};
use crate::core::types::{FleetId, ModuleId, ProjectileId, ShipId, Tick};
use crate::fleet::Armada;
use crate::world::HitScan;

pub struct CombatKernel<W: HitScan> {
    armada: Armada,
    world: W,
    config: CombatConfig,
    beams: Vec<Beam>,
    missiles: Vec<Missile>,
    beam_pool: Pool<Beam>,
    missile_pool: Pool<Missile>,
    rng: ChaCha8Rng,
    tick: Tick,
    elapsed: f32,
    next_projectile: u64,
    /// Standing orders: attacker ship -> target ship
    orders: AHashMap<ShipId, ShipId>,
    /// Time until each weapon may fire again; absent means ready
    cooldowns: AHashMap<ModuleId, f32>,
    /// Events raised between ticks, flushed into the next tick's log
    pending: Vec<CombatEventKind>,
}

impl<W: HitScan> CombatKernel<W> {
    pub fn new(armada: Armada, world: W, config: CombatConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        if armada.aggregator().speed_rule != config.engine_speed_rule {
            return Err(CombatError::InvalidConfig(format!(
                "armada aggregates engines with {:?} but config asks for {:?}",
                armada.aggregator().speed_rule,
                config.engine_speed_rule
            )));
        }

        let capacity = config.pool_capacity;
        Ok(Self {
            armada,
            world,
            config,
            beams: Vec::new(),
            missiles: Vec::new(),
            beam_pool: Pool::new(capacity),
            missile_pool: Pool::new(capacity),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            elapsed: 0.0,
            next_projectile: 1,
            orders: AHashMap::new(),
            cooldowns: AHashMap::new(),
            pending: Vec::new(),
        })
    }

    pub fn armada(&self) -> &Armada {
        &self.armada
    }

    pub fn armada_mut(&mut self) -> &mut Armada {
        &mut self.armada
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn active_beams(&self) -> usize {
        self.beams.len()
    }

    pub fn active_missiles(&self) -> usize {
        self.missiles.len()
    }

    pub fn beam_pool_stats(&self) -> PoolStats {
        self.beam_pool.stats()
    }

    pub fn missile_pool_stats(&self) -> PoolStats {
        self.missile_pool.stats()
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Simulation time advanced so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn orders(&self) -> impl Iterator<Item = (ShipId, ShipId)> + '_ {
        self.orders.iter().map(|(a, t)| (*a, *t))
    }

    /// Fire one shot from a weapon module at a target module
    ///
    /// Ignores the weapon's cooldown but restarts it.
    pub fn fire(&mut self, source: ModuleId, target: ModuleId) -> Result<ProjectileId> {
        let module = self
            .armada
            .module(source)
            .ok_or(CombatError::ModuleNotFound(source))?;
        if !module.is_alive() {
            return Err(CombatError::ModuleDestroyed(source));
        }
        let weapon = module
            .kind
            .weapon()
            .cloned()
            .ok_or(CombatError::NotAWeapon(source))?;
        let mount = module.offset;
        let origin = self
            .armada
            .module_position(source)
            .ok_or(CombatError::ModuleNotFound(source))?;
        let target_position = self
            .armada
            .module_position(target)
            .ok_or(CombatError::ModuleNotFound(target))?;

        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;

        match weapon.projectile.behavior() {
            Behavior::Beam => {
                let mut beam = self.beam_pool.acquire();
                beam.arm(
                    id,
                    source,
                    target,
                    origin,
                    target_position,
                    &weapon,
                    self.config.beam_max_length,
                );
                self.beams.push(beam);
            }
            Behavior::Missile => {
                let launch_duration = self
                    .rng
                    .gen_range(self.config.missile_launch_min..=self.config.missile_launch_max);
                // Tubes point away from the hull; a centre mount launches straight at the target
                let launch_direction = mount
                    .try_normalize()
                    .unwrap_or(target_position - origin);
                let mut missile = self.missile_pool.acquire();
                missile.arm(
                    id,
                    source,
                    target,
                    origin,
                    launch_direction,
                    target_position,
                    &weapon,
                    launch_duration,
                );
                self.missiles.push(missile);
            }
        }

        self.cooldowns.insert(source, weapon.fire_interval);
        tracing::debug!("{} fired {:?} {} at {}", source, weapon.projectile, id, target);
        self.pending.push(CombatEventKind::ProjectileFired {
            projectile: id,
            kind: weapon.projectile,
            source,
            target,
        });
        Ok(id)
    }

    /// Give `attacker` a standing order to fire on `target` every tick
    pub fn engage(&mut self, attacker: ShipId, target: ShipId) -> Result<()> {
        if self.armada.ship(attacker).is_none() {
            return Err(CombatError::ShipNotFound(attacker));
        }
        if self.armada.ship(target).is_none() {
            return Err(CombatError::ShipNotFound(target));
        }
        tracing::debug!("{} engaging {}", attacker, target);
        self.orders.insert(attacker, target);
        Ok(())
    }

    /// Every ship of `attacker` engages the nearest ship of `target`
    pub fn engage_fleet(&mut self, attacker: FleetId, target: FleetId) -> Result<()> {
        let attackers = self
            .armada
            .fleet(attacker)
            .ok_or(CombatError::FleetNotFound(attacker))?;
        let defenders = self
            .armada
            .fleet(target)
            .ok_or(CombatError::FleetNotFound(target))?;

        let orders: Vec<(ShipId, ShipId)> = attackers
            .ships
            .iter()
            .filter_map(|ship| {
                defenders
                    .ships
                    .iter()
                    .filter(|s| !s.is_destroyed())
                    .min_by(|a, b| {
                        a.position
                            .distance_squared(ship.position)
                            .total_cmp(&b.position.distance_squared(ship.position))
                    })
                    .map(|nearest| (ship.id, nearest.id))
            })
            .collect();
        for (ship, nearest) in orders {
            self.engage(ship, nearest)?;
        }
        Ok(())
    }

    /// Cancel a standing order; returns the previous target
    pub fn disengage(&mut self, attacker: ShipId) -> Option<ShipId> {
        self.orders.remove(&attacker)
    }

    /// Advance the session by `dt` time units
    pub fn tick(&mut self, dt: f32) -> CombatEventLog {
        self.tick += 1;
        self.elapsed += dt;
        let mut events = CombatEventLog::new(self.tick);

        self.world.refresh(&self.armada);
        self.run_orders(dt);
        for kind in self.pending.drain(..) {
            events.push(kind);
        }

        self.advance_beams(dt, &mut events);
        self.advance_missiles(dt, &mut events);
        events
    }

    fn run_orders(&mut self, dt: f32) {
        for cooldown in self.cooldowns.values_mut() {
            *cooldown = (*cooldown - dt).max(0.0);
        }

        // Sorted so a seed replays identically
        let mut orders: Vec<(ShipId, ShipId)> = self.orders().collect();
        orders.sort_unstable();

        for (attacker, target) in orders {
            let targets = self.armada.live_targets(target);
            if targets.is_empty() {
                tracing::info!("{} destroyed, {} stands down", target, attacker);
                self.orders.remove(&attacker);
                continue;
            }

            let Some(ship) = self.armada.ship(attacker) else {
                continue;
            };
            let ready: Vec<(ModuleId, Vec3, f32)> = ship
                .live_modules()
                .filter(|m| !self.cooldowns.get(&m.id).is_some_and(|c| *c > 0.0))
                .filter_map(|m| {
                    m.kind
                        .weapon()
                        .map(|w| (m.id, ship.module_position(m), w.range))
                })
                .collect();

            for (weapon, position, range) in ready {
                let in_range: Vec<ModuleId> = targets
                    .iter()
                    .filter(|(_, p)| p.distance(position) <= range)
                    .map(|(id, _)| *id)
                    .collect();
                let Some(&aim) = in_range.choose(&mut self.rng) else {
                    continue;
                };
                if let Err(e) = self.fire(weapon, aim) {
                    tracing::warn!("{} could not fire on {}: {}", weapon, aim, e);
                }
            }
        }
    }

    fn advance_beams(&mut self, dt: f32, events: &mut CombatEventLog) {
        let mut live = Vec::with_capacity(self.beams.len());
        let mut ctx = TickContext {
            armada: &mut self.armada,
            world: &self.world,
            config: &self.config,
            events,
        };
        for mut beam in self.beams.drain(..) {
            match beam.advance(dt, &mut ctx) {
                None => live.push(beam),
                Some(reason) => {
                    tracing::debug!(
                        "{} ended: {:?} after {:.1} damage",
                        beam.id,
                        reason,
                        beam.damage_dealt()
                    );
                    ctx.events.push(CombatEventKind::ProjectileTerminated {
                        projectile: beam.id,
                        reason,
                    });
                    self.beam_pool.release(beam);
                }
            }
        }
        self.beams = live;
    }

    fn advance_missiles(&mut self, dt: f32, events: &mut CombatEventLog) {
        let mut live = Vec::with_capacity(self.missiles.len());
        let mut ctx = TickContext {
            armada: &mut self.armada,
            world: &self.world,
            config: &self.config,
            events,
        };
        for mut missile in self.missiles.drain(..) {
            match missile.advance(dt, &mut ctx) {
                None => live.push(missile),
                Some(reason) => {
                    tracing::debug!("{} ended: {:?}", missile.id, reason);
                    ctx.events.push(CombatEventKind::ProjectileTerminated {
                        projectile: missile.id,
                        reason,
                    });
                    self.missile_pool.release(missile);
                }
            }
        }
        self.missiles = live;
    }
}
