//! AttackOutcome - Result of resolving a single attack

use crate::types::AttackKind;
use serde::{Deserialize, Serialize};

/// How an attack resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitResult {
    /// Not enough mana; nothing happened
    InsufficientMana,
    /// Mana was spent but the attack missed
    Miss,
    Hit,
    Crit,
}

/// Result of resolving an attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// True when the attack connected
    pub success: bool,
    pub result: HitResult,
    /// Narration for the UI layer
    pub message: String,
    /// Damage subtracted from the defender
    pub damage: u32,
    pub is_crit: bool,
    pub mana_spent: u32,
    pub attack_name: String,
    pub kind: AttackKind,
}

impl AttackOutcome {
    pub(crate) fn insufficient_mana(attacker: &str, attack: &str, kind: AttackKind) -> Self {
        AttackOutcome {
            success: false,
            result: HitResult::InsufficientMana,
            message: format!("{} doesn't have enough mana!", attacker),
            damage: 0,
            is_crit: false,
            mana_spent: 0,
            attack_name: attack.to_string(),
            kind,
        }
    }

    pub(crate) fn miss(attacker: &str, attack: &str, kind: AttackKind, mana_spent: u32) -> Self {
        AttackOutcome {
            success: false,
            result: HitResult::Miss,
            message: format!("{}'s {} missed!", attacker, attack),
            damage: 0,
            is_crit: false,
            mana_spent,
            attack_name: attack.to_string(),
            kind,
        }
    }

    pub(crate) fn hit(
        attacker: &str,
        attack: &str,
        kind: AttackKind,
        mana_spent: u32,
        damage: u32,
        is_crit: bool,
    ) -> Self {
        let message = if is_crit {
            format!("{} used {} (Critical Hit!)", attacker, attack)
        } else {
            format!("{} used {}", attacker, attack)
        };
        AttackOutcome {
            success: true,
            result: if is_crit { HitResult::Crit } else { HitResult::Hit },
            message,
            damage,
            is_crit,
            mana_spent,
            attack_name: attack.to_string(),
            kind,
        }
    }
}
