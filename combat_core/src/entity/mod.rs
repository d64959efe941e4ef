//! CombatEntity - Shared stat holder for players and enemies

mod attack;

pub use attack::{Attack, DamageRange};
pub(crate) use attack::clamp_chance;

use crate::types::AttackKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Multiplicative modifiers; all strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub damage: f64,
    pub magic_damage: f64,
    /// Informational: already folded into each attack's miss chance
    pub miss_chance: f64,
    /// Applied when rolling crits, on top of whatever the attack already carries
    pub crit_chance: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Multipliers {
            damage: 1.0,
            magic_damage: 1.0,
            miss_chance: 1.0,
            crit_chance: 1.0,
        }
    }
}

/// Additive equipment-style bonuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bonuses {
    pub damage: u32,
    pub magic_damage: u32,
    pub defense: u32,
    pub magic_defense: u32,
    pub crit_chance: f64,
    pub flee_chance: f64,
}

impl Bonuses {
    /// Flat damage bonus for an attack category
    pub fn damage_for(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Melee => self.damage,
            AttackKind::Magic => self.magic_damage,
        }
    }

    /// Defense against an attack category
    pub fn defense_against(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Melee => self.defense,
            AttackKind::Magic => self.magic_defense,
        }
    }
}

/// A participant in combat.
///
/// Invariants: `health <= max_health`, `mana <= max_mana`. All mutation goes
/// through methods that keep them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub name: String,
    pub level: u32,
    health: u32,
    max_health: u32,
    mana: u32,
    max_mana: u32,
    pub attacks: Vec<Attack>,
    pub multipliers: Multipliers,
    pub bonuses: Bonuses,
}

impl CombatEntity {
    /// Create an entity at full health and mana
    pub fn new(name: impl Into<String>, level: u32, max_health: u32, max_mana: u32) -> Self {
        CombatEntity {
            name: name.into(),
            level,
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            attacks: Vec::new(),
            multipliers: Multipliers::default(),
            bonuses: Bonuses::default(),
        }
    }

    pub fn with_attacks(mut self, attacks: Vec<Attack>) -> Self {
        self.attacks = attacks;
        self
    }

    /// Set current health and mana, clamped to their maxima
    pub fn with_current(mut self, health: u32, mana: u32) -> Self {
        self.health = health.min(self.max_health);
        self.mana = mana.min(self.max_mana);
        self
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    /// Fraction of max health remaining, 0.0 for a zero-health entity
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// First attack of the given category
    pub fn attack_of_kind(&self, kind: AttackKind) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.kind == kind)
    }

    /// Subtract damage, flooring health at 0. Returns damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restore health up to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Restore mana up to the maximum. Returns the amount restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mana - self.mana);
        self.mana += restored;
        restored
    }

    /// Spend mana if enough is available
    pub fn try_spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Regenerate `round(max_mana * fraction)` mana, capped at max.
    /// Returns the amount actually added.
    pub fn regenerate_mana(&mut self, fraction: f64) -> u32 {
        let amount = (self.max_mana as f64 * fraction).round().max(0.0) as u32;
        self.restore_mana(amount)
    }

    /// Single flee roll at `base_chance + flee bonus`
    pub fn try_flee(&self, base_chance: f64, rng: &mut impl Rng) -> bool {
        let chance = clamp_chance(&self.name, "flee", base_chance + self.bonuses.flee_chance);
        rng.gen::<f64>() < chance
    }

    /// Force health to zero
    pub fn set_defeated(&mut self) {
        self.health = 0;
    }

    /// Set health and mana directly, clamped to their maxima
    pub fn set_current(&mut self, health: u32, mana: u32) {
        self.health = health.min(self.max_health);
        self.mana = mana.min(self.max_mana);
    }
}
