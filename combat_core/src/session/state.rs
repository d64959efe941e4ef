//! Combat state machine states and player actions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    AwaitingPlayerAction,
    ResolvingPlayerAttack,
    AwaitingEnemyAction,
    ResolvingEnemyAction,
    EnemyDefeated,
    PlayerDefeated,
    Fled,
}

impl CombatState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CombatState::EnemyDefeated | CombatState::PlayerDefeated | CombatState::Fled
        )
    }

    /// Edges of the turn graph
    pub fn can_transition_to(&self, next: CombatState) -> bool {
        use CombatState::*;
        matches!(
            (self, next),
            (AwaitingPlayerAction, ResolvingPlayerAttack)
                | (AwaitingPlayerAction, AwaitingEnemyAction)
                | (AwaitingPlayerAction, EnemyDefeated)
                | (AwaitingPlayerAction, Fled)
                | (ResolvingPlayerAttack, EnemyDefeated)
                | (ResolvingPlayerAttack, AwaitingEnemyAction)
                | (AwaitingEnemyAction, ResolvingEnemyAction)
                | (ResolvingEnemyAction, PlayerDefeated)
                | (ResolvingEnemyAction, EnemyDefeated)
                | (ResolvingEnemyAction, AwaitingPlayerAction)
        )
    }
}

/// What the player chose to do this round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "item", rename_all = "snake_case")]
pub enum PlayerAction {
    Melee,
    Magic,
    /// Use a consumable by item id
    UseItem(String),
    Pray,
    Flee,
}
