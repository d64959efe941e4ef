//! QuestLog - A player's progress against the quest book

use super::quest::{Quest, QuestBook, QuestReward};
use super::LevelUp;
use crate::config::ProgressionConstants;
use crate::enemy::EnemyIdentity;
use crate::error::QuestError;
use crate::item::ItemCatalog;
use crate::player::PlayerProfile;
use crate::types::AttackKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mutable progress record for one started quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerQuest {
    pub quest_id: String,
    /// Progress per objective, in definition order
    pub progress: Vec<u32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub rewards_claimed: bool,
}

impl PlayerQuest {
    pub fn new(quest: &Quest) -> Self {
        PlayerQuest {
            quest_id: quest.id.clone(),
            progress: vec![0; quest.objectives.len()],
            completed: false,
            rewards_claimed: false,
        }
    }

    /// Objective progress as a JSON array, the form hosts persist
    pub fn progress_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.progress)
    }

    /// Rebuild a record from persisted columns
    pub fn from_persisted(
        quest_id: impl Into<String>,
        progress_json: &str,
        completed: bool,
        rewards_claimed: bool,
    ) -> Result<Self, serde_json::Error> {
        Ok(PlayerQuest {
            quest_id: quest_id.into(),
            progress: serde_json::from_str(progress_json)?,
            completed,
            rewards_claimed,
        })
    }
}

/// Progress change of a single objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveProgress {
    pub index: usize,
    pub progress: u32,
    pub target: u32,
}

/// What a victory did to one quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestUpdate {
    pub quest_id: String,
    pub objectives: Vec<ObjectiveProgress>,
    pub completed: bool,
    /// Set when this completion finished the quest's chain
    pub chain_completed: Option<String>,
}

/// What claiming a quest reward granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedReward {
    pub quest_id: String,
    pub reward: QuestReward,
    pub level_up: Option<LevelUp>,
    /// (item id, count stored)
    pub items_granted: Vec<(String, u32)>,
    /// (item id, count that did not fit or is unknown)
    pub items_rejected: Vec<(String, u32)>,
    pub title_unlocked: Option<String>,
}

/// All quest progress for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestLog {
    #[serde(default)]
    quests: BTreeMap<String, PlayerQuest>,
    #[serde(default)]
    completed_chains: BTreeSet<String>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted record
    pub fn insert(&mut self, record: PlayerQuest) {
        self.quests.insert(record.quest_id.clone(), record);
    }

    pub fn mark_chain_completed(&mut self, chain_id: impl Into<String>) {
        self.completed_chains.insert(chain_id.into());
    }

    pub fn get(&self, quest_id: &str) -> Option<&PlayerQuest> {
        self.quests.get(quest_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerQuest> {
        self.quests.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &PlayerQuest> {
        self.quests.values().filter(|q| !q.completed)
    }

    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.quests.get(quest_id).map_or(false, |q| q.completed)
    }

    pub fn is_chain_completed(&self, chain_id: &str) -> bool {
        self.completed_chains.contains(chain_id)
    }

    pub fn completed_chains(&self) -> impl Iterator<Item = &str> {
        self.completed_chains.iter().map(String::as_str)
    }

    fn requirements_met(&self, book: &QuestBook, quest: &Quest, level: u32) -> bool {
        if let Some(chain) = book.chain_of(&quest.id) {
            if chain.requirements.level > level {
                return false;
            }
            if let Some(prev) = &chain.requirements.previous_chain {
                if !self.is_chain_completed(prev) {
                    return false;
                }
            }
        }
        if quest.requirements.level > level {
            return false;
        }
        match &quest.requirements.previous_quest {
            Some(prev) => self.is_completed(prev),
            None => true,
        }
    }

    /// The next quest to work on in every chain the player qualifies for:
    /// an in-progress quest, or the first unstarted one whose requirements
    /// are met
    pub fn available_quests<'a>(&self, book: &'a QuestBook, level: u32) -> Vec<&'a Quest> {
        let mut available = Vec::new();
        for chain in book.chains() {
            for quest in &chain.quests {
                match self.quests.get(&quest.id) {
                    Some(record) if record.completed => continue,
                    Some(_) => {
                        available.push(quest);
                        break;
                    }
                    None => {
                        if self.requirements_met(book, quest, level) {
                            available.push(quest);
                        }
                        break;
                    }
                }
            }
        }
        available
    }

    pub fn start_quest<'a>(
        &mut self,
        book: &'a QuestBook,
        quest_id: &str,
        level: u32,
    ) -> Result<&'a Quest, QuestError> {
        let quest = book
            .quest(quest_id)
            .ok_or_else(|| QuestError::UnknownQuest(quest_id.to_string()))?;
        if self.quests.contains_key(quest_id) {
            return Err(QuestError::AlreadyStarted(quest_id.to_string()));
        }
        if !self.requirements_met(book, quest, level) {
            return Err(QuestError::RequirementsUnmet(quest_id.to_string()));
        }

        self.quests.insert(quest.id.clone(), PlayerQuest::new(quest));
        tracing::debug!(quest = %quest.id, "quest started");
        Ok(quest)
    }

    /// Advance every active objective the defeated enemy satisfies by one,
    /// capped at its count. Completed quests are never touched again.
    pub fn record_victory(
        &mut self,
        book: &QuestBook,
        enemy: &EnemyIdentity,
        attack: Option<AttackKind>,
    ) -> Vec<QuestUpdate> {
        let mut updates = Vec::new();

        for record in self.quests.values_mut() {
            if record.completed {
                continue;
            }
            let Some(quest) = book.quest(&record.quest_id) else {
                tracing::warn!(quest = %record.quest_id, "progress for unknown quest, skipping");
                continue;
            };
            if record.progress.len() != quest.objectives.len() {
                tracing::warn!(
                    quest = %quest.id,
                    stored = record.progress.len(),
                    defined = quest.objectives.len(),
                    "objective count changed, realigning progress"
                );
                record.progress.resize(quest.objectives.len(), 0);
            }

            let mut changed = Vec::new();
            for (index, objective) in quest.objectives.iter().enumerate() {
                let current = record.progress[index];
                if current >= objective.count || !objective.matches(enemy, attack) {
                    continue;
                }
                let next = (current + 1).min(objective.count);
                record.progress[index] = next;
                changed.push(ObjectiveProgress {
                    index,
                    progress: next,
                    target: objective.count,
                });
            }

            if changed.is_empty() {
                continue;
            }

            record.completed = quest.is_complete(&record.progress);
            let chain_completed = if record.completed {
                book.chain_of(&quest.id)
                    .filter(|chain| chain.final_quest().map(|q| q.id.as_str()) == Some(quest.id.as_str()))
                    .map(|chain| chain.id.clone())
            } else {
                None
            };

            updates.push(QuestUpdate {
                quest_id: quest.id.clone(),
                objectives: changed,
                completed: record.completed,
                chain_completed,
            });
        }

        for update in &updates {
            if let Some(chain) = &update.chain_completed {
                self.completed_chains.insert(chain.clone());
            }
        }
        updates
    }

    /// Grant a completed quest's rewards to the player, once
    pub fn claim_rewards(
        &mut self,
        book: &QuestBook,
        quest_id: &str,
        player: &mut PlayerProfile,
        catalog: &ItemCatalog,
        progression: &ProgressionConstants,
    ) -> Result<ClaimedReward, QuestError> {
        let quest = book
            .quest(quest_id)
            .ok_or_else(|| QuestError::UnknownQuest(quest_id.to_string()))?;
        let record = self
            .quests
            .get_mut(quest_id)
            .ok_or_else(|| QuestError::NotStarted(quest_id.to_string()))?;
        if !record.completed {
            return Err(QuestError::NotComplete(quest_id.to_string()));
        }
        if record.rewards_claimed {
            return Err(QuestError::AlreadyClaimed(quest_id.to_string()));
        }
        record.rewards_claimed = true;

        let reward = quest.rewards.clone();
        player.gold = player.gold.saturating_add(reward.gold);
        let level_up = player.gain_xp(reward.xp, progression, catalog, book);

        let mut items_granted = Vec::new();
        let mut items_rejected = Vec::new();
        for grant in &reward.items {
            let Some(item) = catalog.get(&grant.id) else {
                tracing::warn!(quest = %quest.id, item = %grant.id, "reward item missing from catalog");
                items_rejected.push((grant.id.clone(), grant.count));
                continue;
            };
            let stored = player.inventory.add_item(item, grant.count, player.level);
            if stored > 0 {
                items_granted.push((grant.id.clone(), stored));
            }
            if stored < grant.count {
                items_rejected.push((grant.id.clone(), grant.count - stored));
            }
        }

        let title_unlocked = match &reward.title {
            Some(title) if book.title(title).is_none() => {
                tracing::warn!(quest = %quest.id, title = %title, "reward title not defined");
                None
            }
            Some(title) => player.unlock_title(title.clone()).then(|| title.clone()),
            None => None,
        };

        tracing::info!(player = %player.id, quest = %quest.id, "quest rewards claimed");
        Ok(ClaimedReward {
            quest_id: quest.id.clone(),
            reward,
            level_up,
            items_granted,
            items_rejected,
            title_unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConstants;
    use crate::item::fixtures as item_fixtures;
    use crate::progression::fixtures;
    use proptest::prelude::*;

    fn identity(prefix: Option<&str>, group: &str) -> EnemyIdentity {
        EnemyIdentity {
            prefix: prefix.map(str::to_string),
            group: group.to_string(),
            variant: group.to_string(),
            suffix: None,
        }
    }

    #[test]
    fn test_available_quests_follow_chain() {
        let book = fixtures::book();
        let mut log = QuestLog::new();

        let ids: Vec<_> = log.available_quests(&book, 1).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["wolf_hunt"]);

        log.start_quest(&book, "wolf_hunt", 1).unwrap();
        for _ in 0..3 {
            log.record_victory(&book, &identity(None, "Wolf"), Some(AttackKind::Melee));
        }
        assert!(log.is_completed("wolf_hunt"));

        // alpha_wolf needs level 2
        assert!(log.available_quests(&book, 1).is_empty());
        let ids: Vec<_> = log.available_quests(&book, 2).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha_wolf"]);
    }

    #[test]
    fn test_start_quest_rejections() {
        let book = fixtures::book();
        let mut log = QuestLog::new();

        assert_eq!(
            log.start_quest(&book, "nope", 5),
            Err(QuestError::UnknownQuest("nope".to_string()))
        );
        assert_eq!(
            log.start_quest(&book, "alpha_wolf", 5),
            Err(QuestError::RequirementsUnmet("alpha_wolf".to_string()))
        );
        assert_eq!(
            log.start_quest(&book, "fierce_hunt", 5),
            Err(QuestError::RequirementsUnmet("fierce_hunt".to_string()))
        );
        log.start_quest(&book, "wolf_hunt", 1).unwrap();
        assert_eq!(
            log.start_quest(&book, "wolf_hunt", 1),
            Err(QuestError::AlreadyStarted("wolf_hunt".to_string()))
        );
    }

    #[test]
    fn test_progress_caps_and_completes_chain() {
        let book = fixtures::book();
        let mut log = QuestLog::new();
        log.insert(PlayerQuest::new(book.quest("wolf_hunt").unwrap()));
        log.insert(PlayerQuest {
            quest_id: "alpha_wolf".to_string(),
            progress: vec![0],
            completed: false,
            rewards_claimed: false,
        });

        let wolf = identity(None, "Wolf");
        let updates = log.record_victory(&book, &wolf, Some(AttackKind::Magic));
        assert_eq!(updates.len(), 2);
        let alpha = updates.iter().find(|u| u.quest_id == "alpha_wolf").unwrap();
        assert!(alpha.completed);
        assert_eq!(alpha.chain_completed.as_deref(), Some("wolf_trouble"));
        assert!(log.is_chain_completed("wolf_trouble"));

        for _ in 0..5 {
            log.record_victory(&book, &wolf, None);
        }
        assert_eq!(log.get("wolf_hunt").unwrap().progress, vec![3]);
        assert!(log.record_victory(&book, &wolf, None).is_empty());
    }

    #[test]
    fn test_drifted_progress_is_tolerated() {
        let book = fixtures::book();
        let mut log = QuestLog::new();
        log.insert(PlayerQuest {
            quest_id: "retired_quest".to_string(),
            progress: vec![1],
            completed: false,
            rewards_claimed: false,
        });
        log.insert(PlayerQuest {
            quest_id: "wolf_hunt".to_string(),
            progress: vec![],
            completed: false,
            rewards_claimed: false,
        });

        let updates = log.record_victory(&book, &identity(None, "Wolf"), None);

        assert_eq!(updates.len(), 1);
        assert_eq!(log.get("wolf_hunt").unwrap().progress, vec![1]);
        assert_eq!(log.get("retired_quest").unwrap().progress, vec![1]);
    }

    #[test]
    fn test_claim_rewards_once() {
        let book = fixtures::book();
        let catalog = item_fixtures::catalog();
        let progression = ProgressionConstants::default();
        let mut player = PlayerProfile::new("p1", "Hero", &PlayerConstants::default());
        let mut log = QuestLog::new();
        log.start_quest(&book, "wolf_hunt", 1).unwrap();

        assert_eq!(
            log.claim_rewards(&book, "wolf_hunt", &mut player, &catalog, &progression),
            Err(QuestError::NotComplete("wolf_hunt".to_string()))
        );

        for _ in 0..3 {
            log.record_victory(&book, &identity(None, "Wolf"), None);
        }
        let claimed = log
            .claim_rewards(&book, "wolf_hunt", &mut player, &catalog, &progression)
            .unwrap();

        assert_eq!(claimed.level_up, Some(LevelUp { old_level: 1, new_level: 2 }));
        assert_eq!(player.xp, 50);
        assert_eq!(player.gold, 40);
        assert_eq!(player.inventory.count("health_potion"), 2);
        assert_eq!(claimed.items_granted, vec![("health_potion".to_string(), 2)]);
        assert_eq!(
            log.claim_rewards(&book, "wolf_hunt", &mut player, &catalog, &progression),
            Err(QuestError::AlreadyClaimed("wolf_hunt".to_string()))
        );
        assert_eq!(player.gold, 40);
    }

    #[test]
    fn test_claim_unlocks_title() {
        let book = fixtures::book();
        let catalog = item_fixtures::catalog();
        let mut player = PlayerProfile::new("p1", "Hero", &PlayerConstants::default());
        let mut log = QuestLog::new();
        log.insert(PlayerQuest {
            quest_id: "alpha_wolf".to_string(),
            progress: vec![1],
            completed: true,
            rewards_claimed: false,
        });

        let claimed = log
            .claim_rewards(&book, "alpha_wolf", &mut player, &catalog, &ProgressionConstants::default())
            .unwrap();

        assert_eq!(claimed.title_unlocked.as_deref(), Some("wolf_slayer"));
        assert!(player.titles.contains("wolf_slayer"));
    }

    #[test]
    fn test_progress_json_round_trip() {
        let record = PlayerQuest {
            quest_id: "wolf_hunt".to_string(),
            progress: vec![2, 0],
            completed: false,
            rewards_claimed: false,
        };
        let json = record.progress_json().unwrap();
        assert_eq!(json, "[2,0]");
        let restored = PlayerQuest::from_persisted("wolf_hunt", &json, false, false).unwrap();
        assert_eq!(restored, record);
        assert!(PlayerQuest::from_persisted("wolf_hunt", "not json", false, false).is_err());
    }

    proptest! {
        #[test]
        fn prop_progress_is_monotonic_and_capped(
            kills in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..40)
        ) {
            let book = fixtures::book();
            let mut log = QuestLog::new();
            log.insert(PlayerQuest::new(book.quest("wolf_hunt").unwrap()));
            log.insert(PlayerQuest::new(book.quest("alpha_wolf").unwrap()));
            log.insert(PlayerQuest::new(book.quest("fierce_hunt").unwrap()));

            let mut previous: BTreeMap<String, Vec<u32>> = BTreeMap::new();
            for (is_wolf, fierce, magic) in kills {
                let enemy = identity(fierce.then_some("Fierce"), if is_wolf { "Wolf" } else { "Bandit" });
                let attack = if magic { AttackKind::Magic } else { AttackKind::Melee };
                log.record_victory(&book, &enemy, Some(attack));

                for record in log.iter() {
                    let quest = book.quest(&record.quest_id).unwrap();
                    for (i, obj) in quest.objectives.iter().enumerate() {
                        prop_assert!(record.progress[i] <= obj.count);
                    }
                    if let Some(before) = previous.get(&record.quest_id) {
                        for (old, new) in before.iter().zip(&record.progress) {
                            prop_assert!(new >= old);
                        }
                    }
                    previous.insert(record.quest_id.clone(), record.progress.clone());
                }
            }
        }
    }
}
