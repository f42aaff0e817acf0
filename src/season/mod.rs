//! Season - a round robin of battles
//!
//! Every pair of pets meets exactly once. With an odd number of pets one
//! pet sits out each season round. The season winner has the most battle
//! wins.

pub mod schedule;

pub use schedule::{Pairing, Schedule, SeasonRound};

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::{first_max_index, run_battle, Battle};
use crate::core::error::{PetsError, Result};
use crate::core::types::ContenderId;
use crate::pet::Roster;
use crate::progress::ProgressSink;

/// A completed season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    participants: Vec<ContenderId>,
    rounds: Vec<SeasonRound>,
    battles: Vec<Battle>,
    /// Battle wins, aligned with `participants`
    wins: Vec<u32>,
    byes: Vec<ContenderId>,
    /// Genuine battles played; byes are not counted
    battle_count: u32,
}

impl Season {
    pub fn participants(&self) -> &[ContenderId] {
        &self.participants
    }

    pub fn rounds(&self) -> &[SeasonRound] {
        &self.rounds
    }

    pub fn battles(&self) -> &[Battle] {
        &self.battles
    }

    pub fn wins(&self) -> &[u32] {
        &self.wins
    }

    /// Every bye handed out, in schedule order
    pub fn byes(&self) -> &[ContenderId] {
        &self.byes
    }

    pub fn battle_count(&self) -> u32 {
        self.battle_count
    }

    /// Most battle wins; ties go to the earliest participant
    pub fn winner(&self) -> ContenderId {
        self.participants[first_max_index(&self.wins)]
    }
}

/// Play a full round robin between `participants`
pub fn run_season(
    participants: &[ContenderId],
    fights_per_battle: u32,
    roster: &mut Roster,
    rng: &mut ChaCha8Rng,
    sink: &mut dyn ProgressSink,
) -> Result<Season> {
    if fights_per_battle == 0 {
        return Err(PetsError::NoFightsPerBattle);
    }
    roster.ensure_known(participants)?;
    let schedule = Schedule::new(participants)?;

    let mut season = Season {
        participants: participants.to_vec(),
        rounds: Vec::with_capacity(schedule.len()),
        battles: Vec::new(),
        wins: vec![0; participants.len()],
        byes: Vec::new(),
        battle_count: 0,
    };

    for round in schedule {
        sink.emit(&format!("\nSeason Round #{}", round.number));
        tracing::debug!(round = round.number, "season round");

        for pairing in &round.pairings {
            match *pairing {
                Pairing::Bye(id) => {
                    sink.emit(&format!("{} received a Bye!", roster.contender(id).name()));
                    season.byes.push(id);
                }
                Pairing::Match { home, away } => {
                    season.battle_count += 1;
                    sink.emit(&format!(
                        "\nSeason Battle #{}\nCurrent matchup:\n{}\n{}",
                        season.battle_count,
                        roster.contender(home).name(),
                        roster.contender(away).name()
                    ));

                    let battle = run_battle(&[home, away], fights_per_battle, roster, rng, sink)?;
                    let winner = battle.winner();
                    if let Some(slot) = participants.iter().position(|p| *p == winner) {
                        season.wins[slot] += 1;
                    }

                    sink.emit(&format!(
                        "{} won Season Battle #{}!",
                        roster.contender(winner).name(),
                        season.battle_count
                    ));
                    season.battles.push(battle);
                }
            }
        }

        season.rounds.push(round);
    }

    let winner = season.winner();
    tracing::info!(
        winner = roster.contender(winner).name(),
        battles = season.battle_count,
        "season finished"
    );
    sink.emit(&results_report(&season, roster));

    Ok(season)
}

fn results_report(season: &Season, roster: &Roster) -> String {
    let mut text = String::from("\nThe Season has ended!\nPet Win Counts:\n");
    for (id, wins) in season.participants.iter().zip(&season.wins) {
        text.push_str(&format!("\n{}: {} wins", roster.contender(*id).name(), wins));
    }
    text.push_str(&format!(
        "\n\n{} won the Season!",
        roster.contender(season.winner()).name()
    ));
    text
}
