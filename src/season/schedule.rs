//! Round-robin schedule (circle method)
//!
//! Slot 0 stays fixed. Each round pairs slot `i` with slot `n - 1 - i`, then
//! every other slot moves one place along (the last slot wraps to slot 1).
//! An odd field is padded with an empty slot; whoever meets it gets a bye.

use serde::{Deserialize, Serialize};

use crate::core::error::{PetsError, Result};
use crate::core::types::ContenderId;

/// One pairing in a season round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pairing {
    Match { home: ContenderId, away: ContenderId },
    Bye(ContenderId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRound {
    pub number: u32,
    pub pairings: Vec<Pairing>,
}

impl SeasonRound {
    pub fn matches(&self) -> impl Iterator<Item = (ContenderId, ContenderId)> + '_ {
        self.pairings.iter().filter_map(|pairing| match pairing {
            Pairing::Match { home, away } => Some((*home, *away)),
            Pairing::Bye(_) => None,
        })
    }

    pub fn byes(&self) -> impl Iterator<Item = ContenderId> + '_ {
        self.pairings.iter().filter_map(|pairing| match pairing {
            Pairing::Bye(id) => Some(*id),
            Pairing::Match { .. } => None,
        })
    }
}

/// Yields the `n - 1` rounds of a round robin (n padded to even)
#[derive(Debug, Clone)]
pub struct Schedule {
    slots: Vec<Option<ContenderId>>,
    current: u32,
    total: u32,
}

impl Schedule {
    pub fn new(participants: &[ContenderId]) -> Result<Self> {
        if participants.len() < 2 {
            return Err(PetsError::TooFewPlayers(participants.len()));
        }

        let mut slots: Vec<Option<ContenderId>> = participants.iter().copied().map(Some).collect();
        if slots.len() % 2 == 1 {
            slots.push(None);
        }
        let total = (slots.len() - 1) as u32;

        Ok(Self {
            slots,
            current: 0,
            total,
        })
    }

    /// Slot count after padding
    pub fn padded_len(&self) -> usize {
        self.slots.len()
    }

    fn rotate(&mut self) {
        if let Some(last) = self.slots.pop() {
            self.slots.insert(1, last);
        }
    }
}

impl Iterator for Schedule {
    type Item = SeasonRound;

    fn next(&mut self) -> Option<SeasonRound> {
        if self.current >= self.total {
            return None;
        }

        let n = self.slots.len();
        let pairings = (0..n / 2)
            .filter_map(|i| match (self.slots[i], self.slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some(Pairing::Match { home, away }),
                (Some(id), None) | (None, Some(id)) => Some(Pairing::Bye(id)),
                (None, None) => None,
            })
            .collect();

        self.rotate();
        self.current += 1;

        Some(SeasonRound {
            number: self.current,
            pairings,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.current) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Schedule {}
