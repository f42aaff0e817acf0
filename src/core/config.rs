//! Game configuration
//!
//! A game file is TOML with a `[settings]` table and one `[[pets]]` entry
//! per pet:
//!
//! ```toml
//! [settings]
//! fights_per_battle = 3
//! seed = 42
//!
//! [[pets]]
//! name = "Rex"
//! pet_type = "power"
//! starting_hp = 100.0
//!
//! [[pets]]
//! name = "Whiskers"
//! pet_type = "intelligence"
//! starting_hp = 80.0
//! player = "human"
//! owner = "Ann"
//! ```

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{PetsError, Result};
use crate::core::types::{ContenderId, Owner, PetType, PlayerType};
use crate::pet::{PetProfile, Roster};
use crate::player::{DecisionSource, RandomDecisions};

/// Validated game-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    player_count: usize,
    fights_per_battle: u32,
    seed: u64,
}

impl GameSettings {
    pub fn new(player_count: usize, fights_per_battle: u32, seed: u64) -> Result<Self> {
        if player_count < 2 {
            return Err(PetsError::TooFewPlayers(player_count));
        }
        if fights_per_battle == 0 {
            return Err(PetsError::NoFightsPerBattle);
        }
        Ok(Self {
            player_count,
            fights_per_battle,
            seed,
        })
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn fights_per_battle(&self) -> u32 {
        self.fights_per_battle
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The shared random stream for a run
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

fn default_fights() -> u32 {
    1
}

/// `[settings]` as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsSection {
    /// Defaults to the number of `[[pets]]` entries
    #[serde(default)]
    pub player_count: Option<usize>,
    #[serde(default = "default_fights")]
    pub fights_per_battle: u32,
    #[serde(default)]
    pub seed: u64,
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            player_count: None,
            fights_per_battle: default_fights(),
            seed: 0,
        }
    }
}

/// One `[[pets]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetEntry {
    pub name: String,
    pub pet_type: PetType,
    pub starting_hp: f64,
    #[serde(default)]
    pub player: PlayerType,
    /// Owner name; computer pets default to "Computer"
    #[serde(default)]
    pub owner: Option<String>,
    /// Private random stream for a computer pet
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PetEntry {
    pub fn owner(&self) -> Owner {
        match (self.player, &self.owner) {
            (PlayerType::Human, Some(name)) => Owner::human(name.clone()),
            (PlayerType::Human, None) => Owner::human(self.name.clone()),
            (PlayerType::Computer, Some(name)) => Owner {
                name: name.clone(),
                kind: PlayerType::Computer,
            },
            (PlayerType::Computer, None) => Owner::computer(),
        }
    }

    pub fn profile(&self) -> PetProfile {
        PetProfile::new(self.name.clone(), self.owner(), self.pet_type, self.starting_hp)
    }
}

/// A whole game file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub pets: Vec<PetEntry>,
}

const DEMO_NAMES: [&str; 8] = [
    "Rex", "Bolt", "Sage", "Tank", "Zip", "Newton", "Brick", "Dash",
];

impl GameConfig {
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Computer-only game with pet types cycling Power, Speed, Intelligence
    pub fn demo(count: usize, seed: u64) -> Self {
        let pets = (0..count)
            .map(|i| {
                let name = match DEMO_NAMES.get(i) {
                    Some(name) => name.to_string(),
                    None => format!("Pet {}", i + 1),
                };
                PetEntry {
                    name,
                    pet_type: PetType::all()[i % PetType::COUNT],
                    starting_hp: 100.0,
                    player: PlayerType::Computer,
                    owner: None,
                    seed: None,
                }
            })
            .collect();

        Self {
            settings: SettingsSection {
                player_count: Some(count),
                fights_per_battle: default_fights(),
                seed,
            },
            pets,
        }
    }

    /// Validate `[settings]` against the pet list
    pub fn settings(&self) -> Result<GameSettings> {
        let actual = self.pets.len();
        let expected = self.settings.player_count.unwrap_or(actual);
        if expected != actual {
            return Err(PetsError::PlayerCountMismatch { expected, actual });
        }
        GameSettings::new(expected, self.settings.fights_per_battle, self.settings.seed)
    }

    /// Register every pet. Computer pets draw random skills; `human` builds
    /// the decision source for human-owned pets.
    pub fn build_roster<F>(&self, mut human: F) -> Result<(Roster, Vec<ContenderId>)>
    where
        F: FnMut(&PetEntry) -> Box<dyn DecisionSource>,
    {
        let mut roster = Roster::new();
        let mut ids = Vec::with_capacity(self.pets.len());

        for entry in &self.pets {
            let decider: Box<dyn DecisionSource> = match (entry.player, entry.seed) {
                (PlayerType::Human, _) => human(entry),
                (PlayerType::Computer, Some(seed)) => Box::new(RandomDecisions::with_seed(seed)),
                (PlayerType::Computer, None) => Box::new(RandomDecisions::new()),
            };
            ids.push(roster.register(entry.profile(), decider)?);
        }

        tracing::debug!(pets = ids.len(), "roster built");
        Ok((roster, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ScriptedDecisions;

    const GAME: &str = r#"
[settings]
fights_per_battle = 3
seed = 42

[[pets]]
name = "Rex"
pet_type = "power"
starting_hp = 100.0

[[pets]]
name = "Whiskers"
pet_type = "intelligence"
starting_hp = 80.0
player = "human"
owner = "Ann"

[[pets]]
name = "Zip"
pet_type = "speed"
starting_hp = 60.0
seed = 7
"#;

    #[test]
    fn test_parse_game_file() {
        let config = GameConfig::parse_toml(GAME).unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.player_count(), 3);
        assert_eq!(settings.fights_per_battle(), 3);
        assert_eq!(settings.seed(), 42);
        assert_eq!(config.pets[1].owner(), Owner::human("Ann"));
        assert_eq!(config.pets[2].seed, Some(7));
    }

    #[test]
    fn test_build_roster_uses_human_factory() {
        let config = GameConfig::parse_toml(GAME).unwrap();
        let mut humans = Vec::new();

        let (roster, ids) = config
            .build_roster(|entry| {
                humans.push(entry.name.clone());
                Box::new(ScriptedDecisions::default())
            })
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(humans, vec!["Whiskers".to_string()]);
        assert_eq!(roster.contender(ids[1]).owner().kind, PlayerType::Human);
        assert_eq!(roster.contender(ids[2]).pet_type(), PetType::Speed);
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            GameSettings::new(1, 1, 0),
            Err(PetsError::TooFewPlayers(1))
        ));
        assert!(matches!(
            GameSettings::new(2, 0, 0),
            Err(PetsError::NoFightsPerBattle)
        ));

        let mut config = GameConfig::demo(3, 1);
        config.settings.player_count = Some(4);
        assert!(matches!(
            config.settings(),
            Err(PetsError::PlayerCountMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_bad_pet_rejected_when_building() {
        let mut config = GameConfig::demo(2, 0);
        config.pets[1].starting_hp = 0.0;
        let result = config.build_roster(|_| Box::new(ScriptedDecisions::default()));
        assert!(matches!(result, Err(PetsError::InvalidStartingHp { .. })));
    }

    #[test]
    fn test_unknown_pet_type_is_a_parse_error() {
        let text = "[[pets]]\nname = \"X\"\npet_type = \"fire\"\nstarting_hp = 1.0\n";
        assert!(matches!(
            GameConfig::parse_toml(text),
            Err(PetsError::ConfigError(_))
        ));
    }

    #[test]
    fn test_demo_cycles_types() {
        let config = GameConfig::demo(4, 5);
        let types: Vec<_> = config.pets.iter().map(|p| p.pet_type).collect();
        assert_eq!(
            types,
            vec![
                PetType::Power,
                PetType::Speed,
                PetType::Intelligence,
                PetType::Power
            ]
        );
        assert_eq!(config.settings().unwrap().seed(), 5);
    }
}
