//! GameData - The full static data set and its integrity report

use super::{load_toml, parse_named, ConfigError, GameConstants};
use crate::enemy::EnemyConfig;
use crate::item::{ItemCatalog, ItemsConfig};
use crate::progression::{QuestBook, QuestsConfig};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;

const BUILTIN_CONSTANTS: &str = include_str!("../../config/constants.toml");
const BUILTIN_ENEMIES: &str = include_str!("../../config/enemies.toml");
const BUILTIN_ITEMS: &str = include_str!("../../config/items.toml");
const BUILTIN_QUESTS: &str = include_str!("../../config/quests.toml");

/// Constants, enemies, items and quests, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub constants: GameConstants,
    pub enemies: EnemyConfig,
    pub items: ItemCatalog,
    pub quests: QuestBook,
}

/// A drifted reference or malformed entry. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    MissingRewardItem { quest: String, item: String },
    MissingRewardTitle { quest: String, title: String },
    DanglingNextQuest { quest: String, next: String },
    DanglingPreviousQuest { quest: String, previous: String },
    DanglingPreviousChain { chain: String, previous: String },
    EnemyWithoutAttacks { group: String },
    EnemyWithoutNames { group: String },
    InvertedRange { group: String, stat: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::MissingRewardItem { quest, item } => {
                write!(f, "quest {quest} rewards unknown item {item}")
            }
            IntegrityIssue::MissingRewardTitle { quest, title } => {
                write!(f, "quest {quest} rewards unknown title {title}")
            }
            IntegrityIssue::DanglingNextQuest { quest, next } => {
                write!(f, "quest {quest} points at missing next quest {next}")
            }
            IntegrityIssue::DanglingPreviousQuest { quest, previous } => {
                write!(f, "quest {quest} requires missing quest {previous}")
            }
            IntegrityIssue::DanglingPreviousChain { chain, previous } => {
                write!(f, "chain {chain} requires missing chain {previous}")
            }
            IntegrityIssue::EnemyWithoutAttacks { group } => {
                write!(f, "enemy type {group} has no attacks")
            }
            IntegrityIssue::EnemyWithoutNames { group } => {
                write!(f, "enemy type {group} has no names")
            }
            IntegrityIssue::InvertedRange { group, stat } => {
                write!(f, "enemy type {group} has an inverted {stat} range")
            }
        }
    }
}

impl GameData {
    /// The data set compiled into the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        let constants: GameConstants = parse_named("builtin constants.toml", BUILTIN_CONSTANTS)?;
        let enemies: EnemyConfig = parse_named("builtin enemies.toml", BUILTIN_ENEMIES)?;
        let items: ItemsConfig = parse_named("builtin items.toml", BUILTIN_ITEMS)?;
        let quests: QuestsConfig = parse_named("builtin quests.toml", BUILTIN_QUESTS)?;
        Self::assemble(constants, enemies, items, quests)
    }

    /// Load `constants.toml`, `enemies.toml`, `items.toml` and `quests.toml`
    /// from a directory. Missing files fall back to empty or default data.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let constants = load_optional::<GameConstants>(&dir.join("constants.toml"))?;
        let enemies = load_optional::<EnemyConfig>(&dir.join("enemies.toml"))?;
        let items = load_optional::<ItemsConfig>(&dir.join("items.toml"))?;
        let quests = load_optional::<QuestsConfig>(&dir.join("quests.toml"))?;
        Self::assemble(constants, enemies, items, quests)
    }

    fn assemble(
        constants: GameConstants,
        enemies: EnemyConfig,
        items: ItemsConfig,
        quests: QuestsConfig,
    ) -> Result<Self, ConfigError> {
        validate_constants(&constants)?;
        let data = GameData {
            constants,
            enemies,
            items: ItemCatalog::from(items),
            quests: QuestBook::from(quests),
        };
        for issue in data.integrity_report() {
            tracing::warn!(%issue, "config integrity");
        }
        tracing::debug!(
            enemy_types = data.enemies.enemy_types.len(),
            items = data.items.len(),
            quest_chains = data.quests.chains().len(),
            "game data loaded"
        );
        Ok(data)
    }

    /// Every cross-reference that does not resolve
    pub fn integrity_report(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for chain in self.quests.chains() {
            if let Some(prev) = &chain.requirements.previous_chain {
                if self.quests.chain(prev).is_none() {
                    issues.push(IntegrityIssue::DanglingPreviousChain {
                        chain: chain.id.clone(),
                        previous: prev.clone(),
                    });
                }
            }
        }

        for quest in self.quests.quests() {
            for grant in &quest.rewards.items {
                if !self.items.contains(&grant.id) {
                    issues.push(IntegrityIssue::MissingRewardItem {
                        quest: quest.id.clone(),
                        item: grant.id.clone(),
                    });
                }
            }
            if let Some(title) = &quest.rewards.title {
                if self.quests.title(title).is_none() {
                    issues.push(IntegrityIssue::MissingRewardTitle {
                        quest: quest.id.clone(),
                        title: title.clone(),
                    });
                }
            }
            if let Some(next) = &quest.next_quest {
                if self.quests.quest(next).is_none() {
                    issues.push(IntegrityIssue::DanglingNextQuest {
                        quest: quest.id.clone(),
                        next: next.clone(),
                    });
                }
            }
            if let Some(prev) = &quest.requirements.previous_quest {
                if self.quests.quest(prev).is_none() {
                    issues.push(IntegrityIssue::DanglingPreviousQuest {
                        quest: quest.id.clone(),
                        previous: prev.clone(),
                    });
                }
            }
        }

        for template in &self.enemies.enemy_types {
            let group = &template.group;
            if template.attacks.is_empty() {
                issues.push(IntegrityIssue::EnemyWithoutAttacks {
                    group: group.clone(),
                });
            }
            if template.names.is_empty() {
                issues.push(IntegrityIssue::EnemyWithoutNames {
                    group: group.clone(),
                });
            }
            let stats = &template.base_stats;
            let ranges = [
                ("health", stats.health_range),
                ("mana", stats.mana_range),
                ("level", stats.level_range),
            ];
            for (stat, [lo, hi]) in ranges {
                if lo > hi {
                    issues.push(IntegrityIssue::InvertedRange {
                        group: group.clone(),
                        stat: stat.to_string(),
                    });
                }
            }
            for (_, attack) in template.attacks.iter() {
                if attack.damage[0] > attack.damage[1] {
                    issues.push(IntegrityIssue::InvertedRange {
                        group: group.clone(),
                        stat: format!("{} damage", attack.name),
                    });
                }
            }
        }

        issues
    }
}

fn load_optional<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file absent, using defaults");
        return Ok(T::default());
    }
    load_toml(path)
}

fn validate_constants(constants: &GameConstants) -> Result<(), ConfigError> {
    let fractions = [
        ("combat.player_mana_regen", constants.combat.player_mana_regen),
        ("combat.enemy_mana_regen", constants.combat.enemy_mana_regen),
        ("combat.player_flee_chance", constants.combat.player_flee_chance),
        ("combat.enemy_flee_success", constants.combat.enemy_flee_success),
        ("combat.pray_range[0]", constants.combat.pray_range[0]),
        ("combat.pray_range[1]", constants.combat.pray_range[1]),
        ("generation.affix_chance", constants.generation.affix_chance),
        ("rewards.bonus_consumable_chance", constants.rewards.bonus_consumable_chance),
    ];
    for (name, value) in fractions {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::Validation(format!(
                "{name} must be within [0, 1], got {value}"
            )));
        }
    }
    if constants.progression.xp_per_level == 0 {
        return Err(ConfigError::Validation(
            "progression.xp_per_level must be positive".to_string(),
        ));
    }
    if constants.player.attacks.is_empty() {
        return Err(ConfigError::Validation(
            "player.attacks must not be empty".to_string(),
        ));
    }
    Ok(())
}
