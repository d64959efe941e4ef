//! Attack - A usable combat action

use crate::types::AttackKind;
use serde::{Deserialize, Serialize};

/// Inclusive damage range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    /// Create a range, swapping the bounds if they arrive inverted
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max {
            DamageRange { min, max }
        } else {
            DamageRange { min: max, max: min }
        }
    }

    /// Scale both bounds, rounding each independently.
    /// The result is re-ordered so `min <= max` always holds.
    pub fn scaled(&self, factor: f64) -> Self {
        let min = (self.min as f64 * factor).round().max(0.0) as u32;
        let max = (self.max as f64 * factor).round().max(0.0) as u32;
        DamageRange::new(min, max)
    }
}

impl From<[u32; 2]> for DamageRange {
    fn from(bounds: [u32; 2]) -> Self {
        DamageRange::new(bounds[0], bounds[1])
    }
}

/// A concrete attack attached to a combat entity.
///
/// Multipliers were folded into both chances when the attack was built.
/// Resolution still scales the crit chance by the attacker's own multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub damage: DamageRange,
    pub mana_cost: u32,
    /// Chance in [0, 1]
    pub miss_chance: f64,
    /// Chance in [0, 1]
    pub crit_chance: f64,
    pub kind: AttackKind,
}

impl Attack {
    /// Build an attack, clamping both chances into [0, 1]
    pub fn new(
        name: impl Into<String>,
        damage: DamageRange,
        mana_cost: u32,
        miss_chance: f64,
        crit_chance: f64,
        kind: AttackKind,
    ) -> Self {
        let name = name.into();
        let miss_chance = clamp_chance(&name, "miss", miss_chance);
        let crit_chance = clamp_chance(&name, "crit", crit_chance);
        Attack {
            name,
            damage,
            mana_cost,
            miss_chance,
            crit_chance,
            kind,
        }
    }
}

/// Clamp a combined probability into [0, 1], logging when it had to move
pub(crate) fn clamp_chance(context: &str, what: &str, chance: f64) -> f64 {
    if !(0.0..=1.0).contains(&chance) {
        tracing::warn!(context, what, chance, "probability outside [0, 1], clamping");
    }
    if chance.is_nan() {
        return 0.0;
    }
    chance.clamp(0.0, 1.0)
}
