//! EnemyGenerator - Procedural enemy construction from templates and affixes

use super::template::{Affix, EnemyConfig, EnemyTypeTemplate};
use crate::config::GenerationConstants;
use crate::entity::{clamp_chance, Attack, CombatEntity, Multipliers};
use crate::error::CombatError;
use crate::types::AffixStat;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Structured identity of a generated enemy, kept alongside the display name
/// so quest matching never has to re-parse the string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyIdentity {
    pub prefix: Option<String>,
    /// Species group label from the template
    pub group: String,
    /// The name variant that was picked
    pub variant: String,
    pub suffix: Option<String>,
}

impl EnemyIdentity {
    /// Space-joined `[prefix] variant [suffix]`
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(prefix) = &self.prefix {
            parts.push(prefix);
        }
        parts.push(&self.variant);
        if let Some(suffix) = &self.suffix {
            parts.push(suffix);
        }
        parts.join(" ")
    }

    /// Whether an enemy-type filter names this enemy, by group or variant
    pub fn matches_type(&self, enemy_type: &str) -> bool {
        self.group == enemy_type || self.variant == enemy_type
    }
}

/// A freshly generated enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEnemy {
    pub entity: CombatEntity,
    pub identity: EnemyIdentity,
}

/// Per-stat multipliers after combining affixes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffixMultipliers {
    pub damage: f64,
    pub magic_damage: f64,
    pub health: f64,
    pub mana: f64,
    pub miss_chance: f64,
    pub crit_chance: f64,
    pub defense: f64,
}

impl Default for AffixMultipliers {
    fn default() -> Self {
        AffixMultipliers {
            damage: 1.0,
            magic_damage: 1.0,
            health: 1.0,
            mana: 1.0,
            miss_chance: 1.0,
            crit_chance: 1.0,
            defense: 1.0,
        }
    }
}

impl AffixMultipliers {
    /// Multiply in the prefix then the suffix, stat by stat
    pub fn combine(prefix: Option<&Affix>, suffix: Option<&Affix>) -> Self {
        let mut combined = AffixMultipliers::default();
        for affix in prefix.into_iter().chain(suffix) {
            for (stat, value) in &affix.stat_multipliers {
                *combined.get_mut(*stat) *= value;
            }
        }
        combined
    }

    pub fn get(&self, stat: AffixStat) -> f64 {
        match stat {
            AffixStat::Damage => self.damage,
            AffixStat::MagicDamage => self.magic_damage,
            AffixStat::Health => self.health,
            AffixStat::Mana => self.mana,
            AffixStat::MissChance => self.miss_chance,
            AffixStat::CritChance => self.crit_chance,
            AffixStat::Defense => self.defense,
        }
    }

    fn get_mut(&mut self, stat: AffixStat) -> &mut f64 {
        match stat {
            AffixStat::Damage => &mut self.damage,
            AffixStat::MagicDamage => &mut self.magic_damage,
            AffixStat::Health => &mut self.health,
            AffixStat::Mana => &mut self.mana,
            AffixStat::MissChance => &mut self.miss_chance,
            AffixStat::CritChance => &mut self.crit_chance,
            AffixStat::Defense => &mut self.defense,
        }
    }
}

/// Builds enemies from an [`EnemyConfig`]
#[derive(Debug, Clone)]
pub struct EnemyGenerator {
    config: EnemyConfig,
    constants: GenerationConstants,
}

impl EnemyGenerator {
    pub fn new(config: EnemyConfig, constants: GenerationConstants) -> Self {
        EnemyGenerator { config, constants }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    /// `1 + step * (level - 1)`
    pub fn level_scale(&self, level: u32) -> f64 {
        1.0 + self.constants.level_scale_step * (level.saturating_sub(1)) as f64
    }

    /// Generate an enemy using the thread RNG
    pub fn generate(&self, player_level: u32) -> Result<GeneratedEnemy, CombatError> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(player_level, &mut rng)
    }

    /// Generate an enemy with a provided RNG (for deterministic testing)
    pub fn generate_with_rng(
        &self,
        player_level: u32,
        rng: &mut impl Rng,
    ) -> Result<GeneratedEnemy, CombatError> {
        let template = self
            .config
            .enemy_types
            .choose(rng)
            .ok_or(CombatError::NoEnemyTypes)?;

        let prefix = self.roll_affix(&self.config.affixes.prefixes, rng);
        let suffix = self.roll_affix(&self.config.affixes.suffixes, rng);

        Ok(self.build(template, prefix, suffix, player_level, rng))
    }

    /// Build an enemy from an explicit template and affix choice
    pub fn build(
        &self,
        template: &EnemyTypeTemplate,
        prefix: Option<&Affix>,
        suffix: Option<&Affix>,
        player_level: u32,
        rng: &mut impl Rng,
    ) -> GeneratedEnemy {
        let stats = &template.base_stats;

        let rolled_level = roll_inclusive(stats.level_range, rng);
        let level_cap = player_level.saturating_add(self.constants.max_levels_above_player);
        let level = rolled_level.min(level_cap).max(1);
        let level_scale = self.level_scale(level);

        let multipliers = AffixMultipliers::combine(prefix, suffix);

        let health = scale_stat(roll_inclusive(stats.health_range, rng), level_scale * multipliers.health).max(1);
        let mana = scale_stat(roll_inclusive(stats.mana_range, rng), level_scale * multipliers.mana);

        let attacks: Vec<Attack> = template
            .attacks
            .iter()
            .map(|(kind, atk)| {
                let base = atk.to_attack(kind);
                Attack::new(
                    base.name,
                    base.damage.scaled(level_scale),
                    base.mana_cost,
                    clamp_chance(&atk.name, "miss", atk.miss_chance * multipliers.miss_chance),
                    clamp_chance(&atk.name, "crit", atk.crit_chance * multipliers.crit_chance),
                    base.kind,
                )
            })
            .collect();

        let variant = template
            .names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| template.group.clone());

        let identity = EnemyIdentity {
            prefix: prefix.map(|a| a.name.clone()),
            group: template.group.clone(),
            variant,
            suffix: suffix.map(|a| a.name.clone()),
        };

        let mut entity = CombatEntity::new(identity.display_name(), level, health, mana).with_attacks(attacks);
        // Affix damage multipliers are applied at resolution time, not to the ranges above
        entity.multipliers = Multipliers {
            damage: positive(multipliers.damage),
            magic_damage: positive(multipliers.magic_damage),
            miss_chance: positive(multipliers.miss_chance),
            crit_chance: positive(multipliers.crit_chance),
        };
        entity.bonuses.defense = scale_stat(stats.defense, multipliers.defense);
        entity.bonuses.magic_defense = scale_stat(stats.magic_defense, multipliers.defense);

        tracing::debug!(
            name = %entity.name,
            level,
            health,
            mana,
            "generated enemy"
        );

        GeneratedEnemy { entity, identity }
    }

    fn roll_affix<'a>(&self, pool: &'a [Affix], rng: &mut impl Rng) -> Option<&'a Affix> {
        if rng.gen::<f64>() < self.constants.affix_chance {
            pool.choose(rng)
        } else {
            None
        }
    }
}

/// Uniform draw from an inclusive range, tolerating inverted bounds
fn roll_inclusive(range: [u32; 2], rng: &mut impl Rng) -> u32 {
    let (lo, hi) = if range[0] <= range[1] {
        (range[0], range[1])
    } else {
        (range[1], range[0])
    };
    rng.gen_range(lo..=hi)
}

fn scale_stat(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round().max(0.0) as u32
}

/// Multipliers must stay strictly positive
fn positive(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        tracing::warn!(value, "non-positive affix multiplier, using 1.0");
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::template::{AffixTable, AttackTemplate, BaseStatRanges, EnemyAttacks};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeMap, HashSet};

    fn affix(name: &str, stats: &[(AffixStat, f64)]) -> Affix {
        Affix {
            name: name.to_string(),
            stat_multipliers: stats.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn wolf_template() -> EnemyTypeTemplate {
        EnemyTypeTemplate {
            group: "Beast".to_string(),
            names: vec!["Wolf".to_string(), "Boar".to_string()],
            base_stats: BaseStatRanges {
                health_range: [40, 60],
                mana_range: [20, 30],
                level_range: [1, 10],
                defense: 0,
                magic_defense: 0,
            },
            attacks: EnemyAttacks {
                melee: vec![AttackTemplate {
                    name: "Bite".to_string(),
                    damage: [5, 9],
                    mana_cost: 0,
                    miss_chance: 0.2,
                    crit_chance: 0.1,
                    kind: None,
                }],
                magic: Vec::new(),
            },
        }
    }

    fn test_config() -> EnemyConfig {
        EnemyConfig {
            enemy_types: vec![wolf_template()],
            affixes: AffixTable {
                prefixes: vec![
                    affix("Fierce", &[(AffixStat::Damage, 1.2), (AffixStat::MissChance, 0.8)]),
                    affix("Ancient", &[(AffixStat::Health, 1.5)]),
                ],
                suffixes: vec![affix("of Shadows", &[(AffixStat::CritChance, 1.5), (AffixStat::Damage, 1.1)])],
            },
        }
    }

    fn generator() -> EnemyGenerator {
        EnemyGenerator::new(test_config(), GenerationConstants::default())
    }

    #[test]
    fn test_level_scale() {
        let generator = generator();
        assert!((generator.level_scale(1) - 1.0).abs() < f64::EPSILON);
        assert!((generator.level_scale(6) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_affixes_combine_multiplicatively() {
        let config = test_config();
        let combined = AffixMultipliers::combine(
            Some(&config.affixes.prefixes[0]),
            Some(&config.affixes.suffixes[0]),
        );
        assert!((combined.damage - 1.32).abs() < 1e-9);
        assert!((combined.miss_chance - 0.8).abs() < f64::EPSILON);
        assert!((combined.crit_chance - 1.5).abs() < f64::EPSILON);
        assert!((combined.health - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_applies_scaling_and_affixes() {
        let generator = generator();
        let config = test_config();
        let mut template = wolf_template();
        template.base_stats.health_range = [50, 50];
        template.base_stats.mana_range = [20, 20];
        template.base_stats.level_range = [3, 3];

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let enemy = generator.build(
            &template,
            Some(&config.affixes.prefixes[0]),
            Some(&config.affixes.suffixes[0]),
            10,
            &mut rng,
        );

        // level 3 -> scale 1.2
        assert_eq!(enemy.entity.level, 3);
        assert_eq!(enemy.entity.max_health(), 60);
        assert_eq!(enemy.entity.max_mana(), 24);

        let bite = &enemy.entity.attacks[0];
        // 5..9 * 1.2 = 6..10.8 -> 6..11, damage multiplier not folded in
        assert_eq!(bite.damage.min, 6);
        assert_eq!(bite.damage.max, 11);
        assert!((bite.miss_chance - 0.16).abs() < 1e-9);
        assert!((bite.crit_chance - 0.15).abs() < 1e-9);
        assert!((enemy.entity.multipliers.damage - 1.32).abs() < 1e-9);

        assert!(enemy.entity.name.starts_with("Fierce "));
        assert!(enemy.entity.name.ends_with(" of Shadows"));
        assert_eq!(enemy.identity.group, "Beast");
    }

    #[test]
    fn test_level_capped_relative_to_player() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for player_level in 1..=5 {
            for _ in 0..200 {
                let enemy = generator.generate_with_rng(player_level, &mut rng).unwrap();
                assert!(enemy.entity.level >= 1);
                assert!(enemy.entity.level <= player_level + 2);
            }
        }
    }

    #[test]
    fn test_generated_stats_positive_and_bounded() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        // Max level 3 at player level 1 -> scale 1.2; max health multiplier 1.5
        let max_health = (60.0_f64 * 1.2 * 1.5).round() as u32;
        let max_mana = (30.0_f64 * 1.2).round() as u32;
        for _ in 0..500 {
            let enemy = generator.generate_with_rng(1, &mut rng).unwrap();
            assert!(enemy.entity.health() > 0);
            assert!(enemy.entity.mana() > 0);
            assert!(enemy.entity.max_health() >= 40);
            assert!(enemy.entity.max_health() <= max_health);
            assert!(enemy.entity.max_mana() >= 20);
            assert!(enemy.entity.max_mana() <= max_mana);
        }
    }

    #[test]
    fn test_affix_combination_coverage() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let enemy = generator.generate_with_rng(5, &mut rng).unwrap();
            seen.insert((enemy.identity.prefix.is_some(), enemy.identity.suffix.is_some()));
        }
        assert!(seen.contains(&(false, false)));
        assert!(seen.contains(&(true, false)));
        assert!(seen.contains(&(false, true)));
        assert!(seen.contains(&(true, true)));
    }

    #[test]
    fn test_display_name_matches_identity() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let enemy = generator.generate_with_rng(3, &mut rng).unwrap();
            assert_eq!(enemy.entity.name, enemy.identity.display_name());
        }
    }

    #[test]
    fn test_empty_config_is_rejected() {
        let generator = EnemyGenerator::new(EnemyConfig::default(), GenerationConstants::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generator.generate_with_rng(1, &mut rng),
            Err(CombatError::NoEnemyTypes)
        ));
    }

    #[test]
    fn test_identity_matches_group_or_variant() {
        let identity = EnemyIdentity {
            prefix: None,
            group: "Beast".to_string(),
            variant: "Wolf".to_string(),
            suffix: None,
        };
        assert!(identity.matches_type("Beast"));
        assert!(identity.matches_type("Wolf"));
        assert!(!identity.matches_type("Undead"));
    }
}
