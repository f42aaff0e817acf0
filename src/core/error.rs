use thiserror::Error;

use crate::core::types::ContenderId;

#[derive(Error, Debug)]
pub enum PetsError {
    #[error("Pet '{name}' must have a starting HP greater than zero (got {hp})")]
    InvalidStartingHp { name: String, hp: f64 },

    #[error("Pet name cannot be empty")]
    EmptyPetName,

    #[error("Duplicate pet name: {0}")]
    DuplicatePetName(String),

    #[error("Number of fights per battle must be more than 0")]
    NoFightsPerBattle,

    #[error("Number of players must be more than 1 (got {0})")]
    TooFewPlayers(usize),

    #[error("Player count {expected} does not match the {actual} pets configured")]
    PlayerCountMismatch { expected: usize, actual: usize },

    #[error("Contender not found: {0:?}")]
    ContenderNotFound(ContenderId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PetsError>;
