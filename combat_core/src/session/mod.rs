//! Combat sessions - Turn state machine, enemy AI, rewards and the service

mod ai;
mod encounter;
mod report;
mod rewards;
mod service;
mod state;

pub use ai::{choose_attack, decide, decision_weights, DecisionWeights, EnemyDecision};
pub use encounter::CombatSession;
pub use report::{CombatOutcome, DefeatReport, ItemUse, RewardResult, RoundReport, TurnAction, TurnEvent};
pub use rewards::{resolve_defeat, resolve_victory, victory_xp};
pub use service::{CombatService, PlayerTurn};
pub use state::{CombatState, PlayerAction};
