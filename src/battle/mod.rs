//! Battle aggregator - a fixed number of fights between the same pets
//!
//! Every participant is reset to full HP with no skill recharging before
//! each fight. The battle winner has the most fight wins.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::fight::{run_fight, Fight};
use crate::core::error::{PetsError, Result};
use crate::core::types::ContenderId;
use crate::pet::Roster;
use crate::progress::ProgressSink;

/// A completed battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    participants: Vec<ContenderId>,
    fights_planned: u32,
    fights: Vec<Fight>,
    /// Fight wins, aligned with `participants`
    wins: Vec<u32>,
}

impl Battle {
    pub fn participants(&self) -> &[ContenderId] {
        &self.participants
    }

    pub fn fights_planned(&self) -> u32 {
        self.fights_planned
    }

    pub fn fights(&self) -> &[Fight] {
        &self.fights
    }

    pub fn wins(&self) -> &[u32] {
        &self.wins
    }

    /// Most fight wins; ties go to the earliest participant
    pub fn winner(&self) -> ContenderId {
        self.participants[first_max_index(&self.wins)]
    }
}

/// Index of the first maximum
pub(crate) fn first_max_index<T: PartialOrd>(values: &[T]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

/// Run `fights` fights back to back between `participants`
pub fn run_battle(
    participants: &[ContenderId],
    fights: u32,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Battle> {
    if fights == 0 {
        return Err(PetsError::NoFightsPerBattle);
    }
    if participants.len() < 2 {
        return Err(PetsError::TooFewPlayers(participants.len()));
    }
    roster.ensure_known(participants)?;

    let mut battle = Battle {
        participants: participants.to_vec(),
        fights_planned: fights,
        fights: Vec::with_capacity(fights as usize),
        wins: vec![0; participants.len()],
    };

    for number in 1..=fights {
        roster.reset(participants);
        sink.emit(&fight_header(number, fights, participants, roster));

        let fight = run_fight(participants, roster, rng, sink)?;
        // run_fight always concludes with a winner
        let winner = fight.winner().unwrap_or(participants[0]);
        let slot = first_position(participants, winner);
        battle.wins[slot] += 1;

        sink.emit(&format!(
            "{} won Fight #{}!",
            roster.contender(winner).name(),
            number
        ));
        battle.fights.push(fight);
    }

    let winner = battle.winner();
    tracing::info!(
        winner = roster.contender(winner).name(),
        fights,
        "battle finished"
    );
    sink.emit(&results_report(&battle, roster));

    Ok(battle)
}

fn first_position(participants: &[ContenderId], id: ContenderId) -> usize {
    participants.iter().position(|p| *p == id).unwrap_or(0)
}

fn fight_header(
    number: u32,
    total: u32,
    participants: &[ContenderId],
    roster: &Roster,
) -> String {
    let mut text = format!("\nFight {number} out of {total}\nPets currently fighting:");
    for id in participants {
        let pet = roster.contender(*id);
        text.push_str(&format!(
            "\n\t{} ({} {} Type)",
            pet.name(),
            pet.pet_type().article(),
            pet.pet_type()
        ));
    }
    text
}

fn results_report(battle: &Battle, roster: &Roster) -> String {
    let mut text = String::from("\nThe Battle has ended!\nPet Win Counts:\n");
    for (id, wins) in battle.participants.iter().zip(&battle.wins) {
        text.push_str(&format!("\n{}: {} wins", roster.contender(*id).name(), wins));
    }
    text.push_str(&format!(
        "\n\n{} won the Battle!",
        roster.contender(battle.winner()).name()
    ));
    text
}
