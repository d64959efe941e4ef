//! Victory and defeat resolution

use super::report::{DefeatReport, RewardResult};
use super::CombatSession;
use crate::config::{GameData, RewardConstants};
use crate::entity::CombatEntity;
use crate::loot::{LootDrop, LootGenerator};
use crate::player::PlayerProfile;
use crate::progression::QuestLog;
use rand::Rng;

/// `base + per_level * enemy level`
pub fn victory_xp(enemy_level: u32, constants: &RewardConstants) -> u32 {
    constants
        .base_xp
        .saturating_add(constants.xp_per_enemy_level.saturating_mul(enemy_level))
}

/// Apply a victory to the player: XP with level-ups, gold, loot into the
/// inventory and quest progress. A fled enemy pays out in full.
pub fn resolve_victory(
    profile: &mut PlayerProfile,
    quests: &mut QuestLog,
    data: &GameData,
    session: &CombatSession,
    rng: &mut impl Rng,
) -> RewardResult {
    let enemy = session.enemy();
    let enemy_fled = session.enemy_fled();
    profile.sync_vitals(session.player());

    let xp_gained = victory_xp(enemy.entity.level, &data.constants.rewards);
    let loot = LootGenerator::new(&data.items, &data.constants.rewards).roll_with_rng(enemy.entity.level, rng);

    let level_up = profile.gain_xp(xp_gained, &data.constants.progression, &data.items, &data.quests);
    profile.gold = profile.gold.saturating_add(loot.gold);

    let mut items_stored = Vec::new();
    let mut items_rejected = Vec::new();
    for drop in &loot.items {
        let Some(item) = data.items.get(&drop.item_id) else {
            continue;
        };
        let stored = profile.inventory.add_item(item, drop.count, profile.level);
        if stored > 0 {
            items_stored.push(LootDrop {
                item_id: drop.item_id.clone(),
                count: stored,
            });
        }
        if stored < drop.count {
            tracing::debug!(item = %drop.item_id, "inventory full, loot rejected");
            items_rejected.push(LootDrop {
                item_id: drop.item_id.clone(),
                count: drop.count - stored,
            });
        }
    }

    let quest_updates = quests.record_victory(&data.quests, &enemy.identity, session.last_attack());

    tracing::info!(
        player = %profile.id,
        enemy = %enemy.entity.name,
        xp = xp_gained,
        gold = loot.gold,
        "victory"
    );
    RewardResult {
        xp_gained,
        level_up,
        gold_gained: loot.gold,
        loot,
        items_stored,
        items_rejected,
        quest_updates,
        enemy_fled,
    }
}

/// Restore the player to half health and full mana after losing
pub fn resolve_defeat(profile: &mut PlayerProfile, player: &mut CombatEntity) -> DefeatReport {
    let health = player.max_health() / 2;
    let mana = player.max_mana();
    player.set_current(health, mana);
    profile.sync_vitals(player);

    tracing::info!(player = %profile.id, "defeat");
    DefeatReport {
        health_restored_to: health,
        mana_restored_to: mana,
    }
}
