//! Combat system constants - all tunable values in one place

// Base damage is drawn from [0, MAX_BASE_DAMAGE)
pub const MAX_BASE_DAMAGE: f64 = 5.0;

// Recharge lengths (rounds)
pub const BASIC_SKILL_RECHARGE: u32 = 1;
pub const SPECIAL_SKILL_RECHARGE: u32 = 6;

// Power: countering the opponent multiplies the base draw
pub const POWER_COUNTER_MULTIPLIER: f64 = 5.0;

// Speed: flat bonus inside an HP band
pub const SPEED_BONUS: f64 = 12.5;
pub const SPEED_LOWER_THRESHOLD: f64 = 0.25;
pub const SPEED_UPPER_THRESHOLD: f64 = 0.75;

// Intelligence: increments per recharging opponent skill
pub const INTELLIGENCE_HIGH_BONUS: f64 = 3.0;
pub const INTELLIGENCE_LOW_BONUS: f64 = 2.0;

// Shoot the Moon: correct prediction bonus
pub const SHOOT_THE_MOON_BONUS: f64 = 20.0;
