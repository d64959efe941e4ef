//! Round reports and terminal outcomes handed to the host

use crate::combat::AttackOutcome;
use crate::loot::{Loot, LootDrop};
use crate::progression::{LevelUp, QuestUpdate};
use crate::types::Combatant;
use serde::{Deserialize, Serialize};

/// What a consumable did when used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUse {
    pub item_id: String,
    pub healed: u32,
    pub mana_restored: u32,
    pub damage_dealt: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnAction {
    Attack { outcome: AttackOutcome },
    UseItem { usage: ItemUse },
    Pray { restored: u32 },
    Flee { success: bool },
    Heal { amount: u32 },
    ManaRegen { amount: u32 },
    /// The actor had nothing it could do
    Idle,
}

/// One narrated step with both sides' resources after it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub actor: Combatant,
    pub action: TurnAction,
    pub player_health: u32,
    pub player_mana: u32,
    pub enemy_health: u32,
    pub enemy_mana: u32,
}

/// Everything earned from a victory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardResult {
    pub xp_gained: u32,
    pub level_up: Option<LevelUp>,
    pub gold_gained: u32,
    pub loot: Loot,
    /// Loot that fit in the inventory
    pub items_stored: Vec<LootDrop>,
    /// Loot that did not fit
    pub items_rejected: Vec<LootDrop>,
    pub quest_updates: Vec<QuestUpdate>,
    /// The enemy ran away rather than being killed
    pub enemy_fled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefeatReport {
    pub health_restored_to: u32,
    pub mana_restored_to: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory(RewardResult),
    Defeat(DefeatReport),
    Fled,
}

/// Result of one submitted player turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub events: Vec<TurnEvent>,
    /// Set when the encounter ended this round
    pub outcome: Option<CombatOutcome>,
}

impl RoundReport {
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}
