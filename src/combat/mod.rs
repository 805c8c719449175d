//! Projectile resolution and the combat kernel

pub mod beam;
pub mod constants;
pub mod events;
pub mod kernel;
pub mod missile;
pub mod pool;
pub mod projectile;
pub mod weapons;

pub use beam::Beam;
pub use events::{CombatEvent, CombatEventKind, CombatEventLog, TerminationReason};
pub use kernel::CombatKernel;
pub use missile::Missile;
pub use pool::{Pool, PoolStats, Poolable};
pub use projectile::{TickContext, Tracking};
pub use weapons::{Behavior, ProjectileKind, WeaponStats};
