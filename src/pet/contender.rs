//! A single pet: identity, HP and skill recharge state
//!
//! HP only changes through damage application during a fight or an
//! explicit reset between fights.

use serde::{Deserialize, Serialize};

use crate::combat::skill::{RechargeTimers, SkillKind};
use crate::core::error::{PetsError, Result};
use crate::core::types::{ContenderId, Owner, PetType};

/// Everything needed to create a pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProfile {
    pub name: String,
    pub owner: Owner,
    pub pet_type: PetType,
    pub starting_hp: f64,
}

impl PetProfile {
    pub fn new(
        name: impl Into<String>,
        owner: Owner,
        pet_type: PetType,
        starting_hp: f64,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            pet_type,
            starting_hp,
        }
    }

    /// Check construction invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PetsError::EmptyPetName);
        }
        if !self.starting_hp.is_finite() || self.starting_hp <= 0.0 {
            return Err(PetsError::InvalidStartingHp {
                name: self.name.clone(),
                hp: self.starting_hp,
            });
        }
        Ok(())
    }
}

/// A pet registered in a roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contender {
    id: ContenderId,
    name: String,
    owner: Owner,
    pet_type: PetType,
    starting_hp: f64,
    current_hp: f64,
    recharge: RechargeTimers,
}

impl Contender {
    pub fn new(id: ContenderId, profile: PetProfile) -> Result<Self> {
        profile.validate()?;

        Ok(Self {
            id,
            name: profile.name.trim().to_string(),
            owner: profile.owner,
            pet_type: profile.pet_type,
            starting_hp: profile.starting_hp,
            current_hp: profile.starting_hp,
            recharge: RechargeTimers::new(),
        })
    }

    pub fn id(&self) -> ContenderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn pet_type(&self) -> PetType {
        self.pet_type
    }

    pub fn starting_hp(&self) -> f64 {
        self.starting_hp
    }

    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    /// current / starting
    pub fn hp_fraction(&self) -> f64 {
        self.current_hp / self.starting_hp
    }

    pub fn is_awake(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn recharge(&self) -> &RechargeTimers {
        &self.recharge
    }

    /// Restore starting HP and make every skill usable again
    pub fn reset(&mut self) {
        self.current_hp = self.starting_hp;
        self.recharge.reset();
    }

    /// Negative amounts heal (Reversal of Fortune can deal negative damage)
    pub(crate) fn take_damage(&mut self, amount: f64) {
        self.current_hp -= amount;
    }

    pub(crate) fn record_skill_use(&mut self, skill: SkillKind) {
        self.recharge.record_use(skill);
    }
}
