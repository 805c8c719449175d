//! Capability aggregation - ship and fleet stat profiles derived from modules

pub mod aggregate;
pub mod profile;

pub use aggregate::{Aggregator, EngineSpeedRule, ProfileBasis};
pub use profile::CapabilityProfile;
