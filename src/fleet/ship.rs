//! Ships - ordered collections of modules

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::capability::{Aggregator, CapabilityProfile, ProfileBasis};
use crate::core::types::{ModuleId, ShipId};
use crate::fleet::module::Module;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub modules: Vec<Module>,
    #[serde(default)]
    pub position: Vec3,

    /// Original-basis profile as of joining an armada; later losses do not touch it
    #[serde(skip)]
    base_profile: CapabilityProfile,

    /// Set when any module takes damage; cleared by whoever polls it
    #[serde(skip)]
    dirty: bool,
}

impl Ship {
    pub fn new(id: ShipId, name: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            id,
            name: name.into(),
            modules,
            position: Vec3::ZERO,
            base_profile: CapabilityProfile::default(),
            dirty: false,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    /// World position of one of this ship's modules
    pub fn module_position(&self, module: &Module) -> Vec3 {
        self.position + module.offset
    }

    pub fn live_modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.modules.iter().filter(|m| m.is_alive())
    }

    /// A ship with no live modules is out of the fight
    pub fn is_destroyed(&self) -> bool {
        !self.modules.iter().any(|m| m.is_alive())
    }

    pub fn base_profile(&self) -> &CapabilityProfile {
        &self.base_profile
    }

    pub fn refresh_base_profile(&mut self, aggregator: &Aggregator) {
        self.base_profile = aggregator.ship(self, ProfileBasis::Original);
    }

    pub fn current_profile(&self, aggregator: &Aggregator) -> CapabilityProfile {
        aggregator.ship(self, ProfileBasis::Current)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
