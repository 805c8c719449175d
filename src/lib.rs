//! Fleet Combat - tick-driven combat kernel for modular space fleets

pub mod capability;
pub mod combat;
pub mod core;
pub mod fleet;
pub mod world;
