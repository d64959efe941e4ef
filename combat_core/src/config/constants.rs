//! Game constants configuration

use crate::enemy::AttackTemplate;
use crate::types::AttackKind;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub generation: GenerationConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub player: PlayerConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Player mana regen after their own attack, as a fraction of max mana.
    /// Stays below `enemy_mana_regen`, which has no potions or prayer to back it.
    #[serde(default = "default_player_mana_regen")]
    pub player_mana_regen: f64,
    /// Enemy mana regen at the start of its turn
    #[serde(default = "default_enemy_mana_regen")]
    pub enemy_mana_regen: f64,
    /// Base chance a player flee attempt succeeds
    #[serde(default = "default_player_flee_chance")]
    pub player_flee_chance: f64,
    /// Chance an enemy that decided to flee actually escapes
    #[serde(default = "default_enemy_flee_success")]
    pub enemy_flee_success: f64,
    /// Fraction of max mana restored by prayer, sampled uniformly
    #[serde(default = "default_pray_range")]
    pub pray_range: [f64; 2],
    /// Flat HP an enemy heal restores, sampled uniformly
    #[serde(default = "default_enemy_heal_range")]
    pub enemy_heal_range: [u32; 2],
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            player_mana_regen: default_player_mana_regen(),
            enemy_mana_regen: default_enemy_mana_regen(),
            player_flee_chance: default_player_flee_chance(),
            enemy_flee_success: default_enemy_flee_success(),
            pray_range: default_pray_range(),
            enemy_heal_range: default_enemy_heal_range(),
        }
    }
}

fn default_player_mana_regen() -> f64 {
    0.2
}
fn default_enemy_mana_regen() -> f64 {
    0.3
}
fn default_player_flee_chance() -> f64 {
    0.5
}
fn default_enemy_flee_success() -> f64 {
    0.15
}
fn default_pray_range() -> [f64; 2] {
    [0.2, 0.4]
}
fn default_enemy_heal_range() -> [u32; 2] {
    [20, 40]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConstants {
    /// Independent chance for each of prefix and suffix
    #[serde(default = "default_affix_chance")]
    pub affix_chance: f64,
    /// Enemy level never exceeds player level plus this
    #[serde(default = "default_max_levels_above_player")]
    pub max_levels_above_player: u32,
    /// Linear stat growth per enemy level above 1
    #[serde(default = "default_level_scale_step")]
    pub level_scale_step: f64,
}

impl Default for GenerationConstants {
    fn default() -> Self {
        GenerationConstants {
            affix_chance: default_affix_chance(),
            max_levels_above_player: default_max_levels_above_player(),
            level_scale_step: default_level_scale_step(),
        }
    }
}

fn default_affix_chance() -> f64 {
    0.7
}
fn default_max_levels_above_player() -> u32 {
    2
}
fn default_level_scale_step() -> f64 {
    0.1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_base_xp")]
    pub base_xp: u32,
    #[serde(default = "default_xp_per_enemy_level")]
    pub xp_per_enemy_level: u32,
    /// Gold drop is uniform in `[min * level, max * level]`
    #[serde(default = "default_gold_per_level")]
    pub gold_per_level: [u32; 2],
    #[serde(default = "default_bonus_consumable_chance")]
    pub bonus_consumable_chance: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            base_xp: default_base_xp(),
            xp_per_enemy_level: default_xp_per_enemy_level(),
            gold_per_level: default_gold_per_level(),
            bonus_consumable_chance: default_bonus_consumable_chance(),
        }
    }
}

fn default_base_xp() -> u32 {
    50
}
fn default_xp_per_enemy_level() -> u32 {
    10
}
fn default_gold_per_level() -> [u32; 2] {
    [15, 30]
}
fn default_bonus_consumable_chance() -> f64 {
    0.3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// XP threshold is `level * xp_per_level`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
    #[serde(default = "default_health_per_level")]
    pub health_per_level: u32,
    #[serde(default = "default_mana_per_level")]
    pub mana_per_level: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            xp_per_level: default_xp_per_level(),
            health_per_level: default_health_per_level(),
            mana_per_level: default_mana_per_level(),
        }
    }
}

fn default_xp_per_level() -> u32 {
    100
}
fn default_health_per_level() -> u32 {
    10
}
fn default_mana_per_level() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConstants {
    #[serde(default = "default_base_stat")]
    pub base_health: u32,
    #[serde(default = "default_base_stat")]
    pub base_mana: u32,
    /// Attacks every player has; no multipliers are applied to these
    #[serde(default = "default_player_attacks")]
    pub attacks: Vec<AttackTemplate>,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            base_health: default_base_stat(),
            base_mana: default_base_stat(),
            attacks: default_player_attacks(),
        }
    }
}

fn default_base_stat() -> u32 {
    100
}

fn default_player_attacks() -> Vec<AttackTemplate> {
    vec![
        AttackTemplate {
            name: "Slash".to_string(),
            damage: [8, 15],
            mana_cost: 0,
            miss_chance: 0.1,
            crit_chance: 0.1,
            kind: Some(AttackKind::Melee),
        },
        AttackTemplate {
            name: "Arcane Bolt".to_string(),
            damage: [12, 22],
            mana_cost: 20,
            miss_chance: 0.05,
            crit_chance: 0.15,
            kind: Some(AttackKind::Magic),
        },
    ]
}
