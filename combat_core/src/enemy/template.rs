//! Enemy templates and affixes - static generator input

use crate::entity::{Attack, DamageRange};
use crate::types::{AffixStat, AttackKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enemy species and affix definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyConfig {
    #[serde(default)]
    pub enemy_types: Vec<EnemyTypeTemplate>,
    #[serde(default)]
    pub affixes: AffixTable,
}

/// Prefix and suffix pools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffixTable {
    #[serde(default)]
    pub prefixes: Vec<Affix>,
    #[serde(default)]
    pub suffixes: Vec<Affix>,
}

/// A species definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTypeTemplate {
    /// Group label, e.g. "Beast"
    #[serde(alias = "type")]
    pub group: String,
    /// Display-name variants, one is picked per encounter
    pub names: Vec<String>,
    pub base_stats: BaseStatRanges,
    #[serde(default)]
    pub attacks: EnemyAttacks,
}

/// Inclusive stat ranges for a species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStatRanges {
    pub health_range: [u32; 2],
    pub mana_range: [u32; 2],
    pub level_range: [u32; 2],
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub magic_defense: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyAttacks {
    #[serde(default)]
    pub melee: Vec<AttackTemplate>,
    #[serde(default)]
    pub magic: Vec<AttackTemplate>,
}

impl EnemyAttacks {
    /// All templates paired with the category of the list they came from
    pub fn iter(&self) -> impl Iterator<Item = (AttackKind, &AttackTemplate)> {
        self.melee
            .iter()
            .map(|a| (AttackKind::Melee, a))
            .chain(self.magic.iter().map(|a| (AttackKind::Magic, a)))
    }

    pub fn is_empty(&self) -> bool {
        self.melee.is_empty() && self.magic.is_empty()
    }
}

/// Attack definition before level scaling and affixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTemplate {
    pub name: String,
    pub damage: [u32; 2],
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub miss_chance: f64,
    #[serde(default)]
    pub crit_chance: f64,
    /// Only needed where the category is not implied by the containing list
    #[serde(default, rename = "type")]
    pub kind: Option<AttackKind>,
}

impl AttackTemplate {
    /// Build the attack as-is, no scaling
    pub fn to_attack(&self, default_kind: AttackKind) -> Attack {
        Attack::new(
            self.name.clone(),
            DamageRange::from(self.damage),
            self.mana_cost,
            self.miss_chance,
            self.crit_chance,
            self.kind.unwrap_or(default_kind),
        )
    }
}

/// A named stat modifier applied as a prefix or suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub name: String,
    /// Stat name to multiplier; stats not listed stay at 1.0
    #[serde(default)]
    pub stat_multipliers: BTreeMap<AffixStat, f64>,
}

impl Affix {
    pub fn multiplier(&self, stat: AffixStat) -> f64 {
        self.stat_multipliers.get(&stat).copied().unwrap_or(1.0)
    }
}
