//! StatSource - Trait and implementations for player stat providers

mod base_stats;
mod gear;
mod title;

pub use base_stats::BaseStatsSource;
pub use gear::GearSource;
pub use title::TitleSource;

use crate::entity::Bonuses;
use crate::types::Effect;

/// Trait for anything that contributes stats to a player's combat entity
pub trait StatSource {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// - Base stats: -100
    /// - Gear: 0
    /// - Titles: 100
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}

/// Running totals while folding stat sources
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatAccumulator {
    pub max_health: u32,
    pub max_mana: u32,
    pub bonuses: Bonuses,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single effect into the totals. Consumable-only effects
    /// (damage, heal, mana restore) contribute nothing while equipped.
    pub fn apply_effect(&mut self, effect: &Effect) {
        match *effect {
            Effect::DamageBonus(v) => self.bonuses.damage += v,
            Effect::MagicDamageBonus(v) => self.bonuses.magic_damage += v,
            Effect::Defense(v) => self.bonuses.defense += v,
            Effect::MagicDefense(v) => self.bonuses.magic_defense += v,
            Effect::CritChanceBonus(v) => self.bonuses.crit_chance += v,
            Effect::FleeChanceBonus(v) => self.bonuses.flee_chance += v,
            Effect::HealthBonus(v) => self.max_health += v,
            Effect::ManaBonus(v) => self.max_mana += v,
            Effect::Damage(_) | Effect::Heal(_) | Effect::ManaRestore(_) => {}
        }
    }

    /// Apply sources in priority order
    pub fn from_sources(sources: &[Box<dyn StatSource + '_>]) -> Self {
        let mut accumulator = StatAccumulator::new();
        let mut sorted: Vec<_> = sources.iter().collect();
        sorted.sort_by_key(|s| s.priority());
        for source in sorted {
            source.apply(&mut accumulator);
        }
        accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_effect() {
        let mut acc = StatAccumulator::new();
        acc.apply_effect(&Effect::DamageBonus(4));
        acc.apply_effect(&Effect::DamageBonus(2));
        acc.apply_effect(&Effect::HealthBonus(20));
        acc.apply_effect(&Effect::FleeChanceBonus(0.1));
        acc.apply_effect(&Effect::Heal(50));

        assert_eq!(acc.bonuses.damage, 6);
        assert_eq!(acc.max_health, 20);
        assert!((acc.bonuses.flee_chance - 0.1).abs() < f64::EPSILON);
    }
}
