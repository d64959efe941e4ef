//! Progression - Leveling, quest definitions and quest progress

mod leveling;
mod quest;
mod tracker;

pub use leveling::{settle_xp, xp_needed_for_level, LevelUp};
pub use quest::{
    ChainRequirements, ItemGrant, ObjectiveType, Quest, QuestBook, QuestChain, QuestObjective,
    QuestRequirements, QuestReward, QuestType, QuestsConfig, Title,
};
pub use tracker::{ClaimedReward, ObjectiveProgress, PlayerQuest, QuestLog, QuestUpdate};

#[cfg(test)]
pub(crate) use quest::fixtures;
