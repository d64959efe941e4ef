//! Rejected-action errors. Returning one of these leaves all state untouched.

use crate::types::{AttackKind, EquipmentSlot};
use thiserror::Error;

/// A combat action that could not be accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("player {0} is not in combat")]
    NotInCombat(String),
    #[error("player {0} is already in combat")]
    AlreadyInCombat(String),
    #[error("no {0} attack available")]
    AttackUnavailable(AttackKind),
    #[error("item {0} is not in the inventory")]
    ItemNotInInventory(String),
    #[error("item {0} is not in the catalog")]
    UnknownItem(String),
    #[error("item {0} cannot be used in combat")]
    ItemNotUsable(String),
    #[error("item {0} only has an effect on an enemy")]
    ItemNeedsTarget(String),
    #[error("turn for round {received} submitted, session is waiting on round {expected}")]
    StaleTurn { expected: u32, received: u32 },
    #[error("no enemy types are configured")]
    NoEnemyTypes,
}

/// A quest operation that could not be accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestError {
    #[error("quest {0} does not exist")]
    UnknownQuest(String),
    #[error("quest {0} is already started")]
    AlreadyStarted(String),
    #[error("quest {0} requirements are not met")]
    RequirementsUnmet(String),
    #[error("quest {0} has not been started")]
    NotStarted(String),
    #[error("quest {0} is not complete")]
    NotComplete(String),
    #[error("rewards for quest {0} were already claimed")]
    AlreadyClaimed(String),
}

/// An equipment change that could not be made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquipError {
    #[error("item {item} does not fit the {slot:?} slot")]
    WrongSlot { item: String, slot: EquipmentSlot },
    #[error("item {item} requires level {required}")]
    LevelTooLow { item: String, required: u32 },
}
