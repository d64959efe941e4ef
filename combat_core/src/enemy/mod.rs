//! Enemy generation - Templates, affixes and the procedural generator

mod generator;
mod name;
mod template;

pub use generator::{AffixMultipliers, EnemyGenerator, EnemyIdentity, GeneratedEnemy};
pub use name::{parse_enemy_name, ParsedEnemyName};
pub use template::{
    Affix, AffixTable, AttackTemplate, BaseStatRanges, EnemyAttacks, EnemyConfig, EnemyTypeTemplate,
};
