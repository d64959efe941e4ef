//! Enemy AI - Health-banded attack / heal / flee choice

use crate::entity::{Attack, CombatEntity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyDecision {
    Attack,
    Heal,
    Flee,
}

/// Probabilities of each decision; they sum to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionWeights {
    pub attack: f64,
    pub heal: f64,
    pub flee: f64,
}

pub const LOW_HEALTH: DecisionWeights = DecisionWeights {
    attack: 0.30,
    heal: 0.60,
    flee: 0.10,
};
pub const MID_HEALTH: DecisionWeights = DecisionWeights {
    attack: 0.70,
    heal: 0.20,
    flee: 0.10,
};
pub const HIGH_HEALTH: DecisionWeights = DecisionWeights {
    attack: 0.85,
    heal: 0.10,
    flee: 0.05,
};

/// Below 30% health, below 60%, or otherwise
pub fn decision_weights(health_fraction: f64) -> DecisionWeights {
    if health_fraction < 0.30 {
        LOW_HEALTH
    } else if health_fraction < 0.60 {
        MID_HEALTH
    } else {
        HIGH_HEALTH
    }
}

pub fn decide(enemy: &CombatEntity, rng: &mut impl Rng) -> EnemyDecision {
    let weights = decision_weights(enemy.health_fraction());
    let roll = rng.gen::<f64>();
    if roll < weights.attack {
        EnemyDecision::Attack
    } else if roll < weights.attack + weights.heal {
        EnemyDecision::Heal
    } else {
        EnemyDecision::Flee
    }
}

/// Uniform pick among attacks the enemy can afford. With none affordable any
/// attack is picked and resolves as insufficient mana.
pub fn choose_attack<'a>(enemy: &'a CombatEntity, rng: &mut impl Rng) -> Option<&'a Attack> {
    let affordable: Vec<&Attack> = enemy
        .attacks
        .iter()
        .filter(|a| a.mana_cost <= enemy.mana())
        .collect();
    match affordable.choose(rng) {
        Some(attack) => Some(*attack),
        None => enemy.attacks.choose(rng),
    }
}
