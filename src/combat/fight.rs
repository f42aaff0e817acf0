//! Fight state machine
//!
//! A fight runs rounds until fewer than two pets are awake. Each step
//! recomputes the active set, resolves a round, updates recharge timers and
//! then applies damage in active order.

use ordered_float::OrderedFloat;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::round::{resolve_round, Round};
use crate::combat::skill::SkillKind;
use crate::core::error::{PetsError, Result};
use crate::core::types::{ContenderId, RoundNumber};
use crate::pet::Roster;
use crate::progress::ProgressSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightPhase {
    InProgress,
    Concluded,
}

/// One fight between two or more pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fight {
    participants: Vec<ContenderId>,
    active: Vec<ContenderId>,
    rounds: Vec<Round>,
    round_number: RoundNumber,
    phase: FightPhase,
    winner: Option<ContenderId>,
}

impl Fight {
    /// Start a fight. HP and recharge are taken as they are in the roster.
    pub fn new(participants: Vec<ContenderId>, roster: &Roster) -> Result<Self> {
        if participants.len() < 2 {
            return Err(PetsError::TooFewPlayers(participants.len()));
        }
        roster.ensure_known(&participants)?;

        Ok(Self {
            active: participants.clone(),
            participants,
            rounds: Vec::new(),
            round_number: 0,
            phase: FightPhase::InProgress,
            winner: None,
        })
    }

    pub fn participants(&self) -> &[ContenderId] {
        &self.participants
    }

    /// Pets awake at the start of the latest step
    pub fn active(&self) -> &[ContenderId] {
        &self.active
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round_number(&self) -> RoundNumber {
        self.round_number
    }

    pub fn phase(&self) -> FightPhase {
        self.phase
    }

    pub fn is_concluded(&self) -> bool {
        self.phase == FightPhase::Concluded
    }

    /// Set once the fight has concluded
    pub fn winner(&self) -> Option<ContenderId> {
        self.winner
    }

    /// Advance by one round, or conclude if fewer than two pets are awake
    pub fn step(
        &mut self,
        roster: &mut Roster,
        rng: &mut ChaCha8Rng,
        sink: &mut dyn ProgressSink,
    ) -> FightPhase {
        if self.is_concluded() {
            return self.phase;
        }

        self.active = self
            .participants
            .iter()
            .copied()
            .filter(|id| roster.contender(*id).is_awake())
            .collect();

        if self.active.len() < 2 {
            self.conclude(roster);
            return self.phase;
        }

        self.round_number += 1;
        sink.emit(&pre_round_report(self.round_number, &self.active, roster));

        let round = resolve_round(
            self.round_number,
            &self.active,
            &self.rounds,
            roster,
            rng,
            sink,
        );

        for entry in &round.entries {
            roster.contender_mut(entry.contender).record_skill_use(entry.skill);
        }

        let n = self.active.len();
        for (i, entry) in round.entries.iter().enumerate() {
            let opponent = self.active[(i + 1) % n];
            roster.contender_mut(opponent).take_damage(entry.damage.total());
        }

        sink.emit(&post_round_report(&round, roster));
        self.rounds.push(round);

        self.phase
    }

    /// Step until concluded and return the winner
    pub fn run(
        &mut self,
        roster: &mut Roster,
        rng: &mut ChaCha8Rng,
        sink: &mut dyn ProgressSink,
    ) -> ContenderId {
        while self.step(roster, rng, sink) == FightPhase::InProgress {}
        // conclude() always sets a winner for a non-empty roster
        self.winner.unwrap_or(self.participants[0])
    }

    fn conclude(&mut self, roster: &Roster) {
        let winner = highest_hp(&self.participants, roster);
        tracing::debug!(
            rounds = self.round_number,
            winner = roster.contender(winner).name(),
            "fight concluded"
        );
        self.winner = Some(winner);
        self.phase = FightPhase::Concluded;
    }
}

/// Highest current HP among `participants`; ties go to the earliest
fn highest_hp(participants: &[ContenderId], roster: &Roster) -> ContenderId {
    let mut best = participants[0];
    for &id in &participants[1..] {
        if roster.contender(id).current_hp() > roster.contender(best).current_hp() {
            best = id;
        }
    }
    best
}

/// Run a whole fight between `participants`
pub fn run_fight(
    participants: &[ContenderId],
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Fight> {
    let mut fight = Fight::new(participants.to_vec(), roster)?;
    fight.run(roster, rng, sink);
    Ok(fight)
}

/// "Round #k" then HP and recharge of every active pet, lowest HP first
fn pre_round_report(number: RoundNumber, active: &[ContenderId], roster: &Roster) -> String {
    let mut by_hp: Vec<_> = active.iter().map(|id| roster.contender(*id)).collect();
    by_hp.sort_by_key(|pet| OrderedFloat(pet.current_hp()));

    let mut text = format!("\nRound #{number}");
    for pet in by_hp {
        text.push_str(&format!("\n{}'s Info:\nHP: {}", pet.name(), pet.current_hp()));
        for skill in SkillKind::all() {
            text.push_str(&format!(
                "\n{} Recharge: {}",
                skill,
                pet.recharge().get(skill)
            ));
        }
        text.push('\n');
    }
    text
}

fn post_round_report(round: &Round, roster: &Roster) -> String {
    let mut text = String::new();
    for entry in &round.entries {
        let name = roster.contender(entry.contender).name();
        let difference = round
            .predecessor_of(entry.contender)
            .map(|previous| entry.damage.base - previous.damage.base)
            .unwrap_or(0.0);

        text.push_str(&format!(
            "{name}'s Skill Chosen: {}\n\
             {name}'s Random Damage Dealt: {}\n\
             {name}'s Conditional Damage Dealt: {}\n\
             {name}'s Total Damage Dealt: {}\n\
             {name}'s Random Damage Difference: {}\n\n",
            entry.skill,
            entry.damage.base,
            entry.damage.conditional,
            entry.damage.total(),
            difference,
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Owner, PetType};
    use crate::pet::PetProfile;
    use crate::player::{RandomDecisions, ScriptedDecisions};
    use crate::progress::{MemorySink, NullSink};
    use rand::SeedableRng;

    fn roster_of(hps: &[f64]) -> (Roster, Vec<ContenderId>) {
        let mut roster = Roster::new();
        let ids = hps
            .iter()
            .enumerate()
            .map(|(i, hp)| {
                roster
                    .register(
                        PetProfile::new(format!("Pet{i}"), Owner::computer(), PetType::Speed, *hp),
                        Box::new(RandomDecisions::new()),
                    )
                    .unwrap()
            })
            .collect();
        (roster, ids)
    }

    #[test]
    fn test_needs_two_participants() {
        let (roster, ids) = roster_of(&[10.0]);
        assert!(matches!(
            Fight::new(ids, &roster),
            Err(PetsError::TooFewPlayers(1))
        ));
    }

    #[test]
    fn test_unknown_handle_rejected() {
        let (roster, mut ids) = roster_of(&[10.0, 10.0]);
        ids.push(ContenderId(7));
        assert!(matches!(
            Fight::new(ids, &roster),
            Err(PetsError::ContenderNotFound(ContenderId(7)))
        ));
    }

    #[test]
    fn test_fight_runs_to_completion() {
        let (mut roster, ids) = roster_of(&[20.0, 20.0, 20.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(77);

        let fight = run_fight(&ids, &mut roster, &mut rng, &mut NullSink).unwrap();

        assert!(fight.is_concluded());
        assert!(fight.round_number() >= 1);
        assert_eq!(fight.rounds().len() as u32, fight.round_number());
        let awake = ids.iter().filter(|id| roster.contender(**id).is_awake()).count();
        assert!(awake < 2);
        assert!(ids.contains(&fight.winner().unwrap()));
    }

    #[test]
    fn test_already_asleep_pets_conclude_immediately() {
        let (mut roster, ids) = roster_of(&[10.0, 10.0]);
        roster.contender_mut(ids[0]).take_damage(15.0);
        let mut fight = Fight::new(ids.clone(), &roster).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(fight.step(&mut roster, &mut rng, &mut NullSink), FightPhase::Concluded);
        assert_eq!(fight.round_number(), 0);
        assert_eq!(fight.winner(), Some(ids[1]));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let (mut roster, ids) = roster_of(&[10.0, 10.0, 10.0]);
        for id in &ids {
            roster.contender_mut(*id).take_damage(12.0);
        }
        let mut fight = Fight::new(ids.clone(), &roster).unwrap();
        fight.step(&mut roster, &mut ChaCha8Rng::seed_from_u64(0), &mut NullSink);
        assert_eq!(fight.winner(), Some(ids[0]));
    }

    #[test]
    fn test_step_applies_recharge_and_damage() {
        let mut roster = Roster::new();
        let a = roster
            .register(
                PetProfile::new("A", Owner::computer(), PetType::Power, 100.0),
                Box::new(ScriptedDecisions::new([SkillKind::RockThrow])),
            )
            .unwrap();
        let b = roster
            .register(
                PetProfile::new("B", Owner::computer(), PetType::Power, 100.0),
                Box::new(ScriptedDecisions::new([SkillKind::ShootTheMoon])),
            )
            .unwrap();
        let mut fight = Fight::new(vec![a, b], &roster).unwrap();
        let mut sink = MemorySink::new();

        fight.step(&mut roster, &mut ChaCha8Rng::seed_from_u64(5), &mut sink);

        let round = &fight.rounds()[0];
        let dealt_by_a = round.entry(a).unwrap().damage.total();
        let dealt_by_b = round.entry(b).unwrap().damage.total();
        assert!((roster.contender(b).current_hp() - (100.0 - dealt_by_a)).abs() < 1e-9);
        assert!((roster.contender(a).current_hp() - (100.0 - dealt_by_b)).abs() < 1e-9);

        assert_eq!(roster.contender(a).recharge().get(SkillKind::RockThrow), 1);
        assert_eq!(roster.contender(b).recharge().get(SkillKind::ShootTheMoon), 6);
        assert!(sink.contains("Round #1"));
        assert!(sink.contains("A's Random Damage Difference"));
    }

    #[test]
    fn test_pre_round_report_orders_by_hp() {
        let (mut roster, ids) = roster_of(&[50.0, 10.0, 30.0]);
        roster.contender_mut(ids[0]).take_damage(5.0);
        let text = pre_round_report(3, &ids, &roster);

        let p1 = text.find("Pet1's Info").unwrap();
        let p2 = text.find("Pet2's Info").unwrap();
        let p0 = text.find("Pet0's Info").unwrap();
        assert!(text.starts_with("\nRound #3"));
        assert!(p1 < p2 && p2 < p0);
        assert!(text.contains("Reversal Of Fortune Recharge: 0"));
    }
}
