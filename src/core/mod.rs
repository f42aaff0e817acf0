pub mod config;
pub mod error;
pub mod types;

pub use config::{GameConfig, GameSettings};
pub use error::{PetsError, Result};
