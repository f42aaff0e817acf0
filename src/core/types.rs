//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle of a contender inside a [`Roster`](crate::pet::Roster)
///
/// Handles are assigned in registration order, so comparing them compares
/// roster positions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ContenderId(pub usize);

impl ContenderId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ContenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Round counter inside a fight (1-based once the first round starts)
pub type RoundNumber = u32;

/// Pet type, fixed at creation. Selects the conditional damage rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    /// Beats-counter logic
    Power,
    /// HP-threshold logic
    Speed,
    /// Recharge-exploitation logic
    Intelligence,
}

impl PetType {
    pub const COUNT: usize = 3;

    pub fn all() -> [PetType; 3] {
        [PetType::Power, PetType::Speed, PetType::Intelligence]
    }

    pub fn index(self) -> usize {
        match self {
            PetType::Power => 0,
            PetType::Speed => 1,
            PetType::Intelligence => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PetType::Power => "Power",
            PetType::Speed => "Speed",
            PetType::Intelligence => "Intelligence",
        }
    }

    /// Indefinite article for progress text ("a Power Type", "an Intelligence Type")
    pub fn article(self) -> &'static str {
        match self {
            PetType::Intelligence => "an",
            PetType::Power | PetType::Speed => "a",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who picks the skills for a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    Human,
    #[default]
    Computer,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Human => f.write_str("Human"),
            PlayerType::Computer => f.write_str("Computer"),
        }
    }
}

/// The player owning a pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub kind: PlayerType,
}

impl Owner {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerType::Human,
        }
    }

    pub fn computer() -> Self {
        Self {
            name: "Computer".to_string(),
            kind: PlayerType::Computer,
        }
    }
}
