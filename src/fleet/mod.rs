//! Fleet hierarchy: Module → Ship → Fleet → Armada
//!
//! Modules are the destructible parts. Ships own modules, fleets own ships,
//! and the armada holds every fleet in a session with ownership indices.

pub mod armada;
pub mod loader;
pub mod module;
pub mod ship;

pub use armada::{Armada, Fleet, ModuleOwner};
pub use loader::{
    load_armada_from_file, load_armada_from_json, ArmadaSnapshot, FleetSnapshot, ModuleSnapshot,
    ShipSnapshot,
};
pub use module::{DamageOutcome, Module, ModuleKind};
pub use ship::Ship;
