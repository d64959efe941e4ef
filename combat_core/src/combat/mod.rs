//! Combat math - Attack resolution between two entities

mod resolution;
mod result;

pub use resolution::{resolve_attack, resolve_attack_with_rng, CRIT_MULTIPLIER};
pub use result::{AttackOutcome, HitResult};
