//! Decision sources - where skill choices come from
//!
//! The round resolver asks each pet's decision source for a skill and, for
//! Shoot the Moon, a prediction of the opponent's skill. Sources may offer a
//! recharging skill; the resolver rejects it and asks again.

pub mod automated;
pub mod console;
pub mod scripted;

pub use automated::RandomDecisions;
pub use console::ConsoleDecisions;
pub use scripted::ScriptedDecisions;

use rand_chacha::ChaCha8Rng;

use crate::combat::skill::SkillKind;
use crate::core::types::RoundNumber;
use crate::pet::Contender;

/// What a decision source may look at when choosing
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// The pet being asked
    pub contender: &'a Contender,
    /// Round being resolved
    pub round: RoundNumber,
}

/// Supplies skill choices for one pet
pub trait DecisionSource {
    /// Pick the skill to use this round
    fn choose_skill(&mut self, ctx: &DecisionContext<'_>, rng: &mut ChaCha8Rng) -> SkillKind;

    /// Guess the opponent's skill this round (asked after choosing Shoot the Moon)
    fn predict_opponent_skill(
        &mut self,
        ctx: &DecisionContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> SkillKind;

    /// Called when the last choice was still recharging
    fn skill_rejected(&mut self, _skill: SkillKind) {}
}
