//! Damage engine
//!
//! Every contender deals a random base amount plus a conditional amount.
//! The conditional amount comes from a single (pet type x skill) table so the
//! whole damage matrix can be read in one place:
//!
//! ```text
//!                RockThrow      ScissorsPoke   PaperCut       ShootTheMoon  Reversal
//! Power          counter        counter        counter        prediction    reversal
//! Speed          hp >= .75      .25 <= hp <.75 hp < .25       prediction    reversal
//! Intelligence   recharge       recharge       recharge       prediction    reversal
//! ```

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    INTELLIGENCE_HIGH_BONUS, INTELLIGENCE_LOW_BONUS, MAX_BASE_DAMAGE, POWER_COUNTER_MULTIPLIER,
    SHOOT_THE_MOON_BONUS, SPEED_BONUS, SPEED_LOWER_THRESHOLD, SPEED_UPPER_THRESHOLD,
};
use crate::combat::round::Round;
use crate::combat::skill::{RechargeTimers, SkillKind};
use crate::core::types::{ContenderId, PetType};

/// Damage dealt by one contender in one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    /// Random draw (with the Reversal of Fortune amount folded in)
    pub base: f64,
    /// Rule-based amount
    pub conditional: f64,
    /// Conditional amount is already part of `base`
    pub folded: bool,
}

impl Damage {
    pub fn new(base: f64, conditional: f64) -> Self {
        Self {
            base,
            conditional,
            folded: false,
        }
    }

    /// Reversal of Fortune: the conditional amount joins the base draw
    pub fn folded(draw: f64, conditional: f64) -> Self {
        Self {
            base: draw + conditional,
            conditional,
            folded: true,
        }
    }

    /// HP removed from the opponent. Negative for a losing Reversal of Fortune.
    pub fn total(&self) -> f64 {
        if self.folded {
            self.base
        } else {
            self.base + self.conditional
        }
    }
}

/// How the conditional amount of one (pet type, skill) cell is computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageRule {
    /// Multiplier on the base draw when the opponent played `beaten`
    Counter { beaten: SkillKind },
    /// Flat bonus when the opponent's HP fraction is in `[low, high)` and
    /// the opponent played one of `against`
    HpBand {
        low: f64,
        high: f64,
        against: [SkillKind; 2],
    },
    /// Sum of increments for opponent skills that are recharging
    RechargeExploit {
        high: SkillKind,
        low: [SkillKind; 2],
    },
    /// Bonus for correctly predicting the opponent's skill
    Prediction,
    /// Net base damage taken minus dealt over the fight so far
    Reversal,
}

const POWER_ROW: [DamageRule; SkillKind::COUNT] = [
    DamageRule::Counter {
        beaten: SkillKind::ScissorsPoke,
    },
    DamageRule::Counter {
        beaten: SkillKind::PaperCut,
    },
    DamageRule::Counter {
        beaten: SkillKind::RockThrow,
    },
    DamageRule::Prediction,
    DamageRule::Reversal,
];

const SPEED_ROW: [DamageRule; SkillKind::COUNT] = [
    DamageRule::HpBand {
        low: SPEED_UPPER_THRESHOLD,
        high: f64::INFINITY,
        against: [SkillKind::ScissorsPoke, SkillKind::PaperCut],
    },
    DamageRule::HpBand {
        low: SPEED_LOWER_THRESHOLD,
        high: SPEED_UPPER_THRESHOLD,
        against: [SkillKind::RockThrow, SkillKind::PaperCut],
    },
    DamageRule::HpBand {
        low: 0.0,
        high: SPEED_LOWER_THRESHOLD,
        against: [SkillKind::RockThrow, SkillKind::ScissorsPoke],
    },
    DamageRule::Prediction,
    DamageRule::Reversal,
];

const INTELLIGENCE_ROW: [DamageRule; SkillKind::COUNT] = [
    DamageRule::RechargeExploit {
        high: SkillKind::ScissorsPoke,
        low: [SkillKind::ShootTheMoon, SkillKind::RockThrow],
    },
    DamageRule::RechargeExploit {
        high: SkillKind::PaperCut,
        low: [SkillKind::ShootTheMoon, SkillKind::ScissorsPoke],
    },
    DamageRule::RechargeExploit {
        high: SkillKind::RockThrow,
        low: [SkillKind::ShootTheMoon, SkillKind::PaperCut],
    },
    DamageRule::Prediction,
    DamageRule::Reversal,
];

/// Indexed by `PetType::index()` then `SkillKind::index()`
pub const DAMAGE_TABLE: [[DamageRule; SkillKind::COUNT]; PetType::COUNT] =
    [POWER_ROW, SPEED_ROW, INTELLIGENCE_ROW];

pub fn rule_for(pet_type: PetType, skill: SkillKind) -> DamageRule {
    DAMAGE_TABLE[pet_type.index()][skill.index()]
}

/// Inputs for one contender's damage in one round
#[derive(Debug, Clone, Copy)]
pub struct DamageContext<'a> {
    pub attacker: ContenderId,
    pub pet_type: PetType,
    pub skill: SkillKind,
    /// Only meaningful for Shoot the Moon
    pub prediction: Option<SkillKind>,
    pub opponent_skill: SkillKind,
    pub opponent_recharge: &'a RechargeTimers,
    pub opponent_hp_fraction: f64,
    /// Rounds already completed in this fight
    pub history: &'a [Round],
}

/// Draw the base amount and apply the conditional rule
pub fn compute_damage(ctx: &DamageContext<'_>, rng: &mut ChaCha8Rng) -> Damage {
    let base = rng.gen::<f64>() * MAX_BASE_DAMAGE;
    let conditional = conditional_damage(ctx, base);

    if ctx.skill == SkillKind::ReversalOfFortune {
        Damage::folded(base, conditional)
    } else {
        Damage::new(base, conditional)
    }
}

/// Conditional amount for a given base draw
pub fn conditional_damage(ctx: &DamageContext<'_>, base: f64) -> f64 {
    match rule_for(ctx.pet_type, ctx.skill) {
        DamageRule::Counter { beaten } => {
            if ctx.opponent_skill == beaten {
                POWER_COUNTER_MULTIPLIER * base
            } else {
                0.0
            }
        }
        DamageRule::HpBand { low, high, against } => {
            let fraction = ctx.opponent_hp_fraction;
            if fraction >= low && fraction < high && against.contains(&ctx.opponent_skill) {
                SPEED_BONUS
            } else {
                0.0
            }
        }
        DamageRule::RechargeExploit { high, low } => {
            let recharge = ctx.opponent_recharge;
            let mut total = 0.0;
            if recharge.is_recharging(high) {
                total += INTELLIGENCE_HIGH_BONUS;
            }
            for skill in low {
                if recharge.is_recharging(skill) {
                    total += INTELLIGENCE_LOW_BONUS;
                }
            }
            total
        }
        DamageRule::Prediction => {
            if ctx.prediction == Some(ctx.opponent_skill) {
                SHOOT_THE_MOON_BONUS
            } else {
                0.0
            }
        }
        DamageRule::Reversal => reversal_of_fortune(ctx.attacker, ctx.history),
    }
}

/// -(base dealt - base taken from the predecessor) over earlier rounds
///
/// The predecessor comes from each round's own ordering, which changes as
/// pets fall asleep. Rounds the attacker did not take part in are skipped.
pub fn reversal_of_fortune(attacker: ContenderId, history: &[Round]) -> f64 {
    let mut dealt = 0.0;
    let mut taken = 0.0;

    for round in history {
        let (Some(own), Some(predecessor)) = (round.entry(attacker), round.predecessor_of(attacker))
        else {
            continue;
        };
        dealt += own.damage.base;
        taken += predecessor.damage.base;
    }

    -(dealt - taken)
}
