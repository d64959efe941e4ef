//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an attack; selects which bonus, multiplier and defense apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Magic,
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackKind::Melee => write!(f, "melee"),
            AttackKind::Magic => write!(f, "magic"),
        }
    }
}

/// Which side of the fight an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combatant {
    Player,
    Enemy,
}

/// Stats an affix can scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixStat {
    Damage,
    MagicDamage,
    Health,
    Mana,
    /// Lower is better for this stat
    MissChance,
    CritChance,
    Defense,
}

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Consumable,
    Weapon,
    Helmet,
    Armor,
    Pants,
    Boots,
    Ring,
    Amulet,
    Material,
    Quest,
}

impl ItemKind {
    /// Whether items of this kind go into an equipment slot
    pub fn is_equipment(&self) -> bool {
        matches!(
            self,
            ItemKind::Weapon
                | ItemKind::Helmet
                | ItemKind::Armor
                | ItemKind::Pants
                | ItemKind::Boots
                | ItemKind::Ring
                | ItemKind::Amulet
        )
    }
}

/// Item rarity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Basic,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Tie-break score used when comparing equipment
    pub fn score_bonus(&self) -> f64 {
        match self {
            Rarity::Basic | Rarity::Common => 0.0,
            Rarity::Uncommon => 1.0,
            Rarity::Rare => 3.0,
            Rarity::Epic => 6.0,
            Rarity::Legendary => 10.0,
        }
    }
}

/// Equipment slot on a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Helmet,
    Armor,
    Pants,
    Boots,
    Weapon,
    Ring1,
    Ring2,
    Amulet,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Helmet,
            EquipmentSlot::Armor,
            EquipmentSlot::Pants,
            EquipmentSlot::Boots,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
            EquipmentSlot::Amulet,
        ]
    }

    /// The item kind this slot accepts
    pub fn accepts(&self) -> ItemKind {
        match self {
            EquipmentSlot::Helmet => ItemKind::Helmet,
            EquipmentSlot::Armor => ItemKind::Armor,
            EquipmentSlot::Pants => ItemKind::Pants,
            EquipmentSlot::Boots => ItemKind::Boots,
            EquipmentSlot::Weapon => ItemKind::Weapon,
            EquipmentSlot::Ring1 | EquipmentSlot::Ring2 => ItemKind::Ring,
            EquipmentSlot::Amulet => ItemKind::Amulet,
        }
    }
}

/// Closed set of item, title and consumable effects.
///
/// Serialized as `{ type = "heal", value = 50 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Effect {
    /// Direct damage to the enemy, ignores defense
    Damage(u32),
    Heal(u32),
    ManaRestore(u32),
    DamageBonus(u32),
    MagicDamageBonus(u32),
    Defense(u32),
    MagicDefense(u32),
    /// Fraction added to crit chance (0.05 = +5%)
    CritChanceBonus(f64),
    /// Fraction added to flee chance
    FleeChanceBonus(f64),
    HealthBonus(u32),
    ManaBonus(u32),
}

impl Effect {
    /// Whether the effect does something when a consumable is used in combat
    pub fn is_usable(&self) -> bool {
        matches!(self, Effect::Damage(_) | Effect::Heal(_) | Effect::ManaRestore(_))
    }

    /// Weighted score contribution when comparing equipment
    pub fn score(&self) -> f64 {
        match *self {
            Effect::DamageBonus(v) | Effect::MagicDamageBonus(v) => v as f64 * 2.0,
            Effect::Defense(v) | Effect::MagicDefense(v) => v as f64 * 1.5,
            Effect::HealthBonus(v) => v as f64 * 0.1,
            Effect::ManaBonus(v) => v as f64 * 0.05,
            // Chance bonuses are fractions; score them as percentage points
            Effect::CritChanceBonus(v) => v * 100.0 * 3.0,
            Effect::FleeChanceBonus(v) => v * 100.0 * 0.5,
            Effect::Damage(v) | Effect::Heal(v) | Effect::ManaRestore(v) => v as f64,
        }
    }
}
