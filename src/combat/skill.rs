//! Skill kinds and the recharge state machine
//!
//! A skill is usable only when its recharge counter is 0. Using a skill sets
//! its counter to the skill's maximum and ticks every other counter down by
//! one, never below zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{BASIC_SKILL_RECHARGE, SPECIAL_SKILL_RECHARGE};

/// The five skills every pet knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    RockThrow,
    ScissorsPoke,
    PaperCut,
    ShootTheMoon,
    ReversalOfFortune,
}

impl SkillKind {
    pub const COUNT: usize = 5;

    /// All skills in menu order
    pub fn all() -> [SkillKind; 5] {
        [
            SkillKind::RockThrow,
            SkillKind::ScissorsPoke,
            SkillKind::PaperCut,
            SkillKind::ShootTheMoon,
            SkillKind::ReversalOfFortune,
        ]
    }

    pub fn index(self) -> usize {
        match self {
            SkillKind::RockThrow => 0,
            SkillKind::ScissorsPoke => 1,
            SkillKind::PaperCut => 2,
            SkillKind::ShootTheMoon => 3,
            SkillKind::ReversalOfFortune => 4,
        }
    }

    /// Inverse of [`SkillKind::index`]
    pub fn from_index(index: usize) -> Option<SkillKind> {
        Self::all().get(index).copied()
    }

    /// Rock, scissors or paper
    pub fn is_basic(self) -> bool {
        matches!(
            self,
            SkillKind::RockThrow | SkillKind::ScissorsPoke | SkillKind::PaperCut
        )
    }

    /// Rounds a skill stays unusable after being used
    pub fn max_recharge(self) -> u32 {
        if self.is_basic() {
            BASIC_SKILL_RECHARGE
        } else {
            SPECIAL_SKILL_RECHARGE
        }
    }

    /// The basic skill this one defeats, if any
    ///
    /// PaperCut beats RockThrow, RockThrow beats ScissorsPoke, ScissorsPoke
    /// beats PaperCut.
    pub fn beats(self) -> Option<SkillKind> {
        match self {
            SkillKind::PaperCut => Some(SkillKind::RockThrow),
            SkillKind::RockThrow => Some(SkillKind::ScissorsPoke),
            SkillKind::ScissorsPoke => Some(SkillKind::PaperCut),
            SkillKind::ShootTheMoon | SkillKind::ReversalOfFortune => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillKind::RockThrow => "Rock Throw",
            SkillKind::ScissorsPoke => "Scissors Poke",
            SkillKind::PaperCut => "Paper Cut",
            SkillKind::ShootTheMoon => "Shoot The Moon",
            SkillKind::ReversalOfFortune => "Reversal Of Fortune",
        }
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-skill recharge counters for one pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RechargeTimers {
    remaining: [u32; SkillKind::COUNT],
}

impl RechargeTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: SkillKind) -> u32 {
        self.remaining[skill.index()]
    }

    /// Can this skill be used this round?
    pub fn is_ready(&self, skill: SkillKind) -> bool {
        self.get(skill) == 0
    }

    /// Still recharging (counter > 0)?
    pub fn is_recharging(&self, skill: SkillKind) -> bool {
        !self.is_ready(skill)
    }

    pub fn set(&mut self, skill: SkillKind, rounds: u32) {
        self.remaining[skill.index()] = rounds;
    }

    /// Record a use: `used` goes to its maximum, everything else ticks down
    pub fn record_use(&mut self, used: SkillKind) {
        for skill in SkillKind::all() {
            if skill == used {
                self.set(skill, skill.max_recharge());
            } else {
                let current = self.get(skill);
                self.set(skill, current.saturating_sub(1));
            }
        }
    }

    pub fn reset(&mut self) {
        self.remaining = [0; SkillKind::COUNT];
    }

    /// Skills usable right now, in menu order
    pub fn available(&self) -> impl Iterator<Item = SkillKind> + '_ {
        SkillKind::all()
            .into_iter()
            .filter(move |skill| self.is_ready(*skill))
    }
}
