//! Fleets and the armada that indexes them
//!
//! The armada owns every fleet in a combat session. Module and ship ids are
//! indexed so ownership lookups (module -> ship -> fleet) are O(1); the
//! structure of fleets is fixed once added, only module state changes.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::capability::{Aggregator, CapabilityProfile, ProfileBasis};
use crate::core::error::{CombatError, Result};
use crate::core::types::{FleetId, ModuleId, ShipId};
use crate::fleet::module::{DamageOutcome, Module};
use crate::fleet::ship::Ship;

/// An ordered collection of ships; the friendly-fire boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(id: FleetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ships: Vec::new(),
        }
    }

    pub fn with_ship(mut self, ship: Ship) -> Self {
        self.ships.push(ship);
        self
    }

    pub fn is_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_destroyed)
    }
}

/// Where a module lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleOwner {
    pub fleet: FleetId,
    pub ship: ShipId,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    fleet: usize,
    ship: usize,
}

/// All fleets taking part in a combat session
#[derive(Debug, Clone, Default)]
pub struct Armada {
    fleets: Vec<Fleet>,
    ship_index: AHashMap<ShipId, Slot>,
    module_index: AHashMap<ModuleId, Slot>,
    aggregator: Aggregator,
}

impl Armada {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            ..Default::default()
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Add a fleet, rejecting any id already present
    pub fn add_fleet(&mut self, mut fleet: Fleet) -> Result<()> {
        if self.fleets.iter().any(|f| f.id == fleet.id) {
            return Err(CombatError::DuplicateId(fleet.id.to_string()));
        }

        let fleet_idx = self.fleets.len();
        let mut ships = AHashMap::new();
        let mut modules = AHashMap::new();
        for (ship_idx, ship) in fleet.ships.iter().enumerate() {
            let slot = Slot {
                fleet: fleet_idx,
                ship: ship_idx,
            };
            if self.ship_index.contains_key(&ship.id) || ships.insert(ship.id, slot).is_some() {
                return Err(CombatError::DuplicateId(ship.id.to_string()));
            }
            for module in &ship.modules {
                if self.module_index.contains_key(&module.id)
                    || modules.insert(module.id, slot).is_some()
                {
                    return Err(CombatError::DuplicateId(module.id.to_string()));
                }
            }
        }

        for ship in &mut fleet.ships {
            ship.refresh_base_profile(&self.aggregator);
        }
        tracing::debug!(
            "Fleet {} joined with {} ships, {} modules",
            fleet.id,
            fleet.ships.len(),
            modules.len()
        );

        self.ship_index.extend(ships);
        self.module_index.extend(modules);
        self.fleets.push(fleet);
        Ok(())
    }

    pub fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    pub fn fleet(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        let slot = self.ship_index.get(&id)?;
        Some(&self.fleets[slot.fleet].ships[slot.ship])
    }

    fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        let slot = *self.ship_index.get(&id)?;
        Some(&mut self.fleets[slot.fleet].ships[slot.ship])
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.fleets.iter().flat_map(|f| f.ships.iter())
    }

    pub fn fleet_of_ship(&self, id: ShipId) -> Option<FleetId> {
        let slot = self.ship_index.get(&id)?;
        Some(self.fleets[slot.fleet].id)
    }

    pub fn set_ship_position(&mut self, id: ShipId, position: Vec3) -> Result<()> {
        let ship = self.ship_mut(id).ok_or(CombatError::ShipNotFound(id))?;
        ship.position = position;
        Ok(())
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        let slot = self.module_index.get(&id)?;
        self.fleets[slot.fleet].ships[slot.ship].module(id)
    }

    pub fn module_owner(&self, id: ModuleId) -> Option<ModuleOwner> {
        let slot = self.module_index.get(&id)?;
        let fleet = &self.fleets[slot.fleet];
        Some(ModuleOwner {
            fleet: fleet.id,
            ship: fleet.ships[slot.ship].id,
        })
    }

    /// World position of a module, dead or alive
    pub fn module_position(&self, id: ModuleId) -> Option<Vec3> {
        let slot = self.module_index.get(&id)?;
        let ship = &self.fleets[slot.fleet].ships[slot.ship];
        ship.module(id).map(|m| ship.module_position(m))
    }

    /// True only when both modules resolve to the same fleet
    ///
    /// A failed lookup on either side counts as "not friendly".
    pub fn same_fleet(&self, a: ModuleId, b: ModuleId) -> bool {
        match (self.module_owner(a), self.module_owner(b)) {
            (Some(a), Some(b)) => a.fleet == b.fleet,
            _ => false,
        }
    }

    /// Apply damage to a module and flag its ship for a profile refresh
    pub fn apply_damage(&mut self, id: ModuleId, amount: f32) -> Option<DamageOutcome> {
        let slot = *self.module_index.get(&id)?;
        let ship = &mut self.fleets[slot.fleet].ships[slot.ship];
        let outcome = ship.module_mut(id)?.apply_damage(amount);
        if outcome.applied > 0.0 {
            ship.mark_dirty();
        }
        Some(outcome)
    }

    /// Ships whose modules took damage since the last call
    pub fn take_dirty_ships(&mut self) -> Vec<ShipId> {
        self.fleets
            .iter_mut()
            .flat_map(|f| f.ships.iter_mut())
            .filter_map(|ship| ship.take_dirty().then_some(ship.id))
            .collect()
    }

    /// Live modules of a ship together with their world positions
    pub fn live_targets(&self, ship: ShipId) -> Vec<(ModuleId, Vec3)> {
        self.ship(ship)
            .map(|s| {
                s.live_modules()
                    .map(|m| (m.id, s.module_position(m)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn ship_profile(&self, id: ShipId, basis: ProfileBasis) -> Option<CapabilityProfile> {
        self.ship(id).map(|s| self.aggregator.ship(s, basis))
    }

    pub fn fleet_profile(&self, id: FleetId, basis: ProfileBasis) -> Option<CapabilityProfile> {
        self.fleet(id).map(|f| self.aggregator.fleet(f, basis))
    }

    /// Sum of the base profiles cached when the fleet joined
    pub fn initial_fleet_profile(&self, id: FleetId) -> Option<CapabilityProfile> {
        self.fleet(id)
            .map(|f| f.ships.iter().map(|s| *s.base_profile()).sum())
    }
}
