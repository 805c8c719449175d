//! Load fleets from authoritative JSON snapshots
//!
//! The server hands out fleet, ship and module state as JSON; this module
//! converts it into an `Armada` at session start. Health is optional in a
//! snapshot and defaults to full.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::capability::Aggregator;
use crate::core::error::{CombatError, Result};
use crate::core::types::{FleetId, ModuleId, ShipId};
use crate::fleet::armada::{Armada, Fleet};
use crate::fleet::module::{Module, ModuleKind};
use crate::fleet::ship::Ship;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmadaSnapshot {
    pub fleets: Vec<FleetSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub ships: Vec<ShipSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    pub modules: Vec<ModuleSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub id: u32,
    pub subtype: String,
    #[serde(flatten)]
    pub kind: ModuleKind,
    pub health_max: f32,
    /// Missing means undamaged
    #[serde(default)]
    pub health: Option<f32>,
    #[serde(default)]
    pub offset: [f32; 3],
}

impl ModuleSnapshot {
    fn to_runtime(&self) -> Result<Module> {
        let id = ModuleId(self.id);
        let invalid = |reason: String| CombatError::InvalidModule { id, reason };

        if !(self.health_max > 0.0 && self.health_max.is_finite()) {
            return Err(invalid(format!(
                "health_max ({}) must be positive",
                self.health_max
            )));
        }
        let health = self.health.unwrap_or(self.health_max);
        if !(0.0..=self.health_max).contains(&health) {
            return Err(invalid(format!(
                "health ({}) outside [0, {}]",
                health, self.health_max
            )));
        }
        if let ModuleKind::Weapon(stats) = &self.kind {
            stats.validate().map_err(invalid)?;
        }

        let mut module = Module::new(id, self.subtype.clone(), self.kind.clone(), self.health_max)
            .with_offset(Vec3::from_array(self.offset));
        module.health = health;
        Ok(module)
    }
}

impl ShipSnapshot {
    fn to_runtime(&self) -> Result<Ship> {
        let modules = self
            .modules
            .iter()
            .map(ModuleSnapshot::to_runtime)
            .collect::<Result<Vec<_>>>()?;
        Ok(Ship::new(ShipId(self.id), self.name.clone(), modules)
            .with_position(Vec3::from_array(self.position)))
    }
}

impl FleetSnapshot {
    pub fn to_runtime(&self) -> Result<Fleet> {
        let mut fleet = Fleet::new(FleetId(self.id), self.name.clone());
        for ship in &self.ships {
            fleet.ships.push(ship.to_runtime()?);
        }
        Ok(fleet)
    }
}

impl ArmadaSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an armada; every id must be unique across the snapshot
    pub fn into_armada(self, aggregator: Aggregator) -> Result<Armada> {
        let mut armada = Armada::new(aggregator);
        for fleet in &self.fleets {
            armada.add_fleet(fleet.to_runtime()?)?;
        }
        Ok(armada)
    }
}

/// Load an armada from a JSON string
pub fn load_armada_from_json(json: &str, aggregator: Aggregator) -> Result<Armada> {
    ArmadaSnapshot::from_json(json)?.into_armada(aggregator)
}

/// Load an armada from a JSON file on disk
pub fn load_armada_from_file(path: &Path, aggregator: Aggregator) -> Result<Armada> {
    let content = std::fs::read_to_string(path)?;
    let armada = load_armada_from_json(&content, aggregator)?;
    tracing::info!(
        "Loaded {} fleets from {}",
        armada.fleets().len(),
        path.display()
    );
    Ok(armada)
}
