//! Pets and the roster that owns them

pub mod contender;
pub mod roster;

pub use contender::{Contender, PetProfile};
pub use roster::Roster;
