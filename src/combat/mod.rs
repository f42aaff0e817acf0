//! Combat: skills, damage, round resolution and the fight state machine

pub mod constants;
pub mod damage;
pub mod fight;
pub mod round;
pub mod skill;

pub use damage::{compute_damage, Damage, DamageContext, DamageRule};
pub use fight::{run_fight, Fight, FightPhase};
pub use round::{resolve_round, Round, RoundEntry};
pub use skill::{RechargeTimers, SkillKind};
