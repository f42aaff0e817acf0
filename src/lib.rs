//! Battle Pets - turn-based pet combat
//!
//! Pets fight in rounds until one is left awake, fights are grouped into
//! battles and battles into round-robin seasons. All randomness comes from
//! one seeded stream, so a seed replays a whole season exactly.

pub mod battle;
pub mod combat;
pub mod core;
pub mod pet;
pub mod player;
pub mod progress;
pub mod season;
