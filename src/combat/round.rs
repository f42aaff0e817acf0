//! Round resolution
//!
//! Every active pet picks a skill (and a prediction for Shoot the Moon)
//! before any damage is computed, so all damage sees the pre-round state.
//! Pet `i` attacks pet `(i + 1) % n`.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::damage::{compute_damage, Damage, DamageContext};
use crate::combat::skill::SkillKind;
use crate::core::types::{ContenderId, PlayerType, RoundNumber};
use crate::pet::Roster;
use crate::player::DecisionContext;
use crate::progress::ProgressSink;

pub const RECHARGING_NOTICE: &str = "That Skill needs to finish recharging before being used again.";

/// One pet's part of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub contender: ContenderId,
    pub skill: SkillKind,
    /// Only set for Shoot the Moon
    pub prediction: Option<SkillKind>,
    pub damage: Damage,
}

/// A resolved round. Entries are in the active order of that round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: RoundNumber,
    pub entries: Vec<RoundEntry>,
}

impl Round {
    pub fn new(number: RoundNumber, entries: Vec<RoundEntry>) -> Self {
        Self { number, entries }
    }

    pub fn position(&self, id: ContenderId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.contender == id)
    }

    pub fn entry(&self, id: ContenderId) -> Option<&RoundEntry> {
        self.position(id).map(|i| &self.entries[i])
    }

    /// Entry at `(idx - 1) mod n`
    pub fn predecessor_of(&self, id: ContenderId) -> Option<&RoundEntry> {
        let n = self.entries.len();
        let idx = self.position(id)?;
        Some(&self.entries[(idx + n - 1) % n])
    }

    /// Entry at `(idx + 1) mod n`, the pet this one attacked
    pub fn opponent_of(&self, id: ContenderId) -> Option<&RoundEntry> {
        let n = self.entries.len();
        let idx = self.position(id)?;
        Some(&self.entries[(idx + 1) % n])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn skill_menu(pet_name: &str, question: &str) -> String {
    let mut text = format!("{pet_name}, please {question}:");
    for (i, skill) in SkillKind::all().iter().enumerate() {
        text.push_str(&format!("\n\t{}) {}", i + 1, skill));
    }
    text
}

/// Ask a pet's decision source until it names a ready skill
fn collect_skill(
    id: ContenderId,
    number: RoundNumber,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> SkillKind {
    let (contender, decider) = roster.decision_parts(id);
    let ctx = DecisionContext {
        contender,
        round: number,
    };
    let is_human = contender.owner().kind == PlayerType::Human;

    loop {
        if is_human {
            sink.emit(&skill_menu(contender.name(), "select a Skill"));
        }

        let skill = decider.choose_skill(&ctx, rng);
        if contender.recharge().is_ready(skill) {
            return skill;
        }

        tracing::debug!(pet = contender.name(), %skill, "rejected recharging skill");
        decider.skill_rejected(skill);
        sink.emit(RECHARGING_NOTICE);
    }
}

fn collect_prediction(
    id: ContenderId,
    number: RoundNumber,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> SkillKind {
    let (contender, decider) = roster.decision_parts(id);
    let ctx = DecisionContext {
        contender,
        round: number,
    };
    if contender.owner().kind == PlayerType::Human {
        sink.emit(&skill_menu(
            contender.name(),
            "predict your opponent's Skill",
        ));
    }
    decider.predict_opponent_skill(&ctx, rng)
}

/// Resolve one round for `active` (at least two pets, in circular order)
///
/// Reads HP and recharge state from the roster but does not change it;
/// the fight applies recharge and damage afterwards.
pub fn resolve_round(
    number: RoundNumber,
    active: &[ContenderId],
    history: &[Round],
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Round {
    let n = active.len();

    let mut choices = Vec::with_capacity(n);
    for &id in active {
        let skill = collect_skill(id, number, roster, rng, sink);
        let prediction = if skill == SkillKind::ShootTheMoon {
            Some(collect_prediction(id, number, roster, rng, sink))
        } else {
            None
        };
        choices.push((skill, prediction));
    }

    let mut entries = Vec::with_capacity(n);
    for (i, &id) in active.iter().enumerate() {
        let (skill, prediction) = choices[i];
        let opponent_index = (i + 1) % n;
        let opponent = roster.contender(active[opponent_index]);
        let attacker = roster.contender(id);

        let ctx = DamageContext {
            attacker: id,
            pet_type: attacker.pet_type(),
            skill,
            prediction,
            opponent_skill: choices[opponent_index].0,
            opponent_recharge: opponent.recharge(),
            opponent_hp_fraction: opponent.hp_fraction(),
            history,
        };
        let damage = compute_damage(&ctx, rng);

        tracing::debug!(
            round = number,
            pet = attacker.name(),
            %skill,
            base = damage.base,
            conditional = damage.conditional,
            total = damage.total(),
            "damage computed"
        );

        entries.push(RoundEntry {
            contender: id,
            skill,
            prediction,
            damage,
        });
    }

    Round::new(number, entries)
}
