use thiserror::Error;

use crate::core::types::{FleetId, ModuleId, ShipId};

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Module not found: {0}")]
    ModuleNotFound(ModuleId),

    #[error("Ship not found: {0}")]
    ShipNotFound(ShipId),

    #[error("Fleet not found: {0}")]
    FleetNotFound(FleetId),

    #[error("Module {0} is not a weapon")]
    NotAWeapon(ModuleId),

    #[error("Module {0} is destroyed")]
    ModuleDestroyed(ModuleId),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid module {id}: {reason}")]
    InvalidModule { id: ModuleId, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
