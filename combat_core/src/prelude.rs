//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::entity::{Attack, CombatEntity, DamageRange};
pub use crate::types::{AttackKind, Combatant, Effect, EquipmentSlot, ItemKind, Rarity};

// Combat
pub use crate::combat::{resolve_attack, resolve_attack_with_rng, AttackOutcome, HitResult};

// Sessions
pub use crate::session::{
    CombatOutcome, CombatService, CombatSession, CombatState, PlayerAction, PlayerTurn, RoundReport,
    TurnAction, TurnEvent,
};

// Enemies
pub use crate::enemy::{EnemyGenerator, EnemyIdentity, GeneratedEnemy};

// Player and progression
pub use crate::player::PlayerProfile;
pub use crate::progression::{LevelUp, QuestBook, QuestLog};
pub use crate::item::{Equipment, Inventory, Item, ItemCatalog};

// Config and errors
pub use crate::config::{GameConstants, GameData};
pub use crate::error::{CombatError, QuestError};
