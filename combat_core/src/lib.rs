//! combat_core - Turn-based RPG combat and progression engine
//!
//! This library provides:
//! - CombatEntity: Health/mana primitives shared by players and enemies
//! - Attack resolution: mana, miss, damage, crit, multipliers and defense
//! - EnemyGenerator: Level-scaled enemies from templates and affixes
//! - CombatSession / CombatService: The turn state machine and session store
//! - Progression: Leveling, loot and quest-chain progress

pub mod combat;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod item;
pub mod loot;
pub mod player;
pub mod prelude;
pub mod progression;
pub mod session;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use combat::{resolve_attack, AttackOutcome, HitResult};
pub use config::{ConfigError, GameConstants, GameData, IntegrityIssue};
pub use enemy::{EnemyConfig, EnemyGenerator, EnemyIdentity, GeneratedEnemy};
pub use entity::{Attack, Bonuses, CombatEntity, DamageRange, Multipliers};
pub use error::{CombatError, EquipError, QuestError};
pub use item::{Equipment, Inventory, Item, ItemCatalog};
pub use loot::{Loot, LootDrop, LootGenerator};
pub use player::PlayerProfile;
pub use progression::{LevelUp, QuestBook, QuestLog, QuestUpdate, Title};
pub use session::{
    CombatOutcome, CombatService, CombatSession, CombatState, PlayerAction, PlayerTurn, RoundReport,
};
pub use source::{BaseStatsSource, GearSource, StatAccumulator, StatSource, TitleSource};
pub use types::{AttackKind, Combatant, Effect, EquipmentSlot, ItemKind, Rarity};
