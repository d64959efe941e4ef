//! Quest definitions - Chains, quests, objectives, rewards and titles

use crate::enemy::EnemyIdentity;
use crate::types::{AttackKind, Effect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Combat,
    BossCombat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveType {
    Combat,
    CombatWithAttack,
}

/// A countable sub-goal. Every filter that is set must equal the
/// defeated enemy's component for the objective to advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestObjective {
    #[serde(rename = "type")]
    pub kind: ObjectiveType,
    #[serde(default)]
    pub description: String,
    pub count: u32,
    #[serde(default)]
    pub enemy_type: Option<String>,
    #[serde(default)]
    pub enemy_prefix: Option<String>,
    #[serde(default)]
    pub enemy_suffix: Option<String>,
    #[serde(default)]
    pub attack_type: Option<AttackKind>,
}

impl QuestObjective {
    pub fn matches(&self, enemy: &EnemyIdentity, attack: Option<AttackKind>) -> bool {
        let type_ok = self
            .enemy_type
            .as_deref()
            .map_or(true, |t| enemy.matches_type(t));
        let prefix_ok = self
            .enemy_prefix
            .as_deref()
            .map_or(true, |p| enemy.prefix.as_deref() == Some(p));
        let suffix_ok = self
            .enemy_suffix
            .as_deref()
            .map_or(true, |s| enemy.suffix.as_deref() == Some(s));
        let attack_ok = self.attack_type.map_or(true, |a| attack == Some(a));

        type_ok && prefix_ok && suffix_ok && attack_ok
    }
}

/// An item granted by a quest reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    pub id: String,
    #[serde(default = "default_grant_count")]
    pub count: u32,
}

fn default_grant_count() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub items: Vec<ItemGrant>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRequirements {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub previous_quest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: QuestType,
    pub objectives: Vec<QuestObjective>,
    #[serde(default)]
    pub rewards: QuestReward,
    #[serde(default)]
    pub requirements: QuestRequirements,
    #[serde(default)]
    pub next_quest: Option<String>,
}

impl Quest {
    /// Complete iff every objective has reached its count
    pub fn is_complete(&self, progress: &[u32]) -> bool {
        self.objectives
            .iter()
            .enumerate()
            .all(|(i, obj)| progress.get(i).copied().unwrap_or(0) >= obj.count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRequirements {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub previous_chain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestChain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub requirements: ChainRequirements,
}

impl QuestChain {
    /// Finishing this quest finishes the chain
    pub fn final_quest(&self) -> Option<&Quest> {
        self.quests.last()
    }
}

/// A named bonus bundle unlocked through quest rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bonuses: Vec<Effect>,
}

/// Root of quests.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestsConfig {
    #[serde(default)]
    pub quest_chains: Vec<QuestChain>,
    #[serde(default)]
    pub titles: Vec<Title>,
}

/// Indexed, immutable quest data
#[derive(Debug, Clone, Default)]
pub struct QuestBook {
    chains: Vec<QuestChain>,
    /// quest id -> (chain index, quest index)
    index: HashMap<String, (usize, usize)>,
    titles: HashMap<String, Title>,
}

impl QuestBook {
    pub fn new(config: QuestsConfig) -> Self {
        let mut index = HashMap::new();
        for (ci, chain) in config.quest_chains.iter().enumerate() {
            for (qi, quest) in chain.quests.iter().enumerate() {
                if index.insert(quest.id.clone(), (ci, qi)).is_some() {
                    tracing::warn!(quest = %quest.id, "duplicate quest id, keeping the later definition");
                }
            }
        }
        let titles = config
            .titles
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

        QuestBook {
            chains: config.quest_chains,
            index,
            titles,
        }
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        let &(ci, qi) = self.index.get(id)?;
        self.chains.get(ci)?.quests.get(qi)
    }

    /// The chain a quest belongs to
    pub fn chain_of(&self, quest_id: &str) -> Option<&QuestChain> {
        let &(ci, _) = self.index.get(quest_id)?;
        self.chains.get(ci)
    }

    pub fn chain(&self, id: &str) -> Option<&QuestChain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chains(&self) -> &[QuestChain] {
        &self.chains
    }

    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.chains.iter().flat_map(|c| c.quests.iter())
    }

    pub fn title(&self, id: &str) -> Option<&Title> {
        self.titles.get(id)
    }

    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.titles.values()
    }
}

impl From<QuestsConfig> for QuestBook {
    fn from(config: QuestsConfig) -> Self {
        QuestBook::new(config)
    }
}
