//! PlayerProfile - Persistent player state and combat rehydration

use crate::config::{PlayerConstants, ProgressionConstants};
use crate::entity::CombatEntity;
use crate::item::{Equipment, Inventory, ItemCatalog};
use crate::error::CombatError;
use crate::progression::{settle_xp, LevelUp, QuestBook};
use crate::session::ItemUse;
use crate::source::{BaseStatsSource, StatAccumulator, StatSource, TitleSource};
use crate::types::{AttackKind, Effect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the host persists about a player between interactions.
///
/// `max_health`/`max_mana` are the level-derived base values; gear and the
/// active title add to them when the combat entity is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub titles: BTreeSet<String>,
    #[serde(default)]
    pub active_title: Option<String>,
}

impl PlayerProfile {
    /// A fresh level 1 player at full health and mana
    pub fn new(id: impl Into<String>, name: impl Into<String>, constants: &PlayerConstants) -> Self {
        PlayerProfile {
            id: id.into(),
            name: name.into(),
            level: 1,
            xp: 0,
            gold: 0,
            health: constants.base_health,
            max_health: constants.base_health,
            mana: constants.base_mana,
            max_mana: constants.base_mana,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            titles: BTreeSet::new(),
            active_title: None,
        }
    }

    /// Fold base stats, gear and the active title into an accumulator
    pub fn stat_totals(&self, catalog: &ItemCatalog, quests: &QuestBook) -> StatAccumulator {
        let mut sources: Vec<Box<dyn StatSource + '_>> =
            vec![Box::new(BaseStatsSource::new(self.max_health, self.max_mana))];
        for gear in self.equipment.sources(catalog) {
            sources.push(Box::new(gear));
        }
        if let Some(title_id) = &self.active_title {
            match quests.title(title_id) {
                Some(title) => sources.push(Box::new(TitleSource::new(title))),
                None => tracing::warn!(player = %self.id, title = %title_id, "active title not defined, ignoring"),
            }
        }
        StatAccumulator::from_sources(&sources)
    }

    /// Rehydrate the player's combat entity from the profile
    pub fn combat_entity(
        &self,
        catalog: &ItemCatalog,
        quests: &QuestBook,
        constants: &PlayerConstants,
    ) -> CombatEntity {
        let totals = self.stat_totals(catalog, quests);
        let attacks = constants
            .attacks
            .iter()
            .map(|a| a.to_attack(AttackKind::Melee))
            .collect();

        let mut entity = CombatEntity::new(self.name.clone(), self.level, totals.max_health, totals.max_mana)
            .with_attacks(attacks)
            .with_current(self.health, self.mana);
        entity.bonuses = totals.bonuses;
        entity
    }

    /// Copy current health and mana back after a fight
    pub fn sync_vitals(&mut self, entity: &CombatEntity) {
        self.health = entity.health();
        self.mana = entity.mana();
    }

    /// Add XP and resolve every pending level-up. Each level adds the
    /// per-level health and mana, and any level-up refills both to the
    /// gear-inclusive maximum.
    pub fn gain_xp(
        &mut self,
        amount: u32,
        progression: &ProgressionConstants,
        catalog: &ItemCatalog,
        quests: &QuestBook,
    ) -> Option<LevelUp> {
        let old_level = self.level;
        let (level, xp) = settle_xp(self.level, self.xp.saturating_add(amount), progression);
        self.level = level;
        self.xp = xp;

        if level == old_level {
            return None;
        }

        let gained = level - old_level;
        self.max_health = self
            .max_health
            .saturating_add(gained.saturating_mul(progression.health_per_level));
        self.max_mana = self
            .max_mana
            .saturating_add(gained.saturating_mul(progression.mana_per_level));

        let totals = self.stat_totals(catalog, quests);
        self.health = totals.max_health;
        self.mana = totals.max_mana;

        tracing::info!(player = %self.id, old_level, new_level = level, "level up");
        Some(LevelUp {
            old_level,
            new_level: level,
        })
    }

    /// Drink a consumable outside combat. Healing and mana are capped at the
    /// gear-inclusive maxima and one item is removed. Items whose only
    /// effect is damage are rejected and kept.
    pub fn use_item(
        &mut self,
        item_id: &str,
        catalog: &ItemCatalog,
        quests: &QuestBook,
    ) -> Result<ItemUse, CombatError> {
        let item = catalog
            .get(item_id)
            .ok_or_else(|| CombatError::UnknownItem(item_id.to_string()))?;
        if !item.is_usable_in_combat() {
            return Err(CombatError::ItemNotUsable(item_id.to_string()));
        }
        if !self.inventory.contains(item_id) {
            return Err(CombatError::ItemNotInInventory(item_id.to_string()));
        }
        if !item.restores_health() && !item.restores_mana() {
            return Err(CombatError::ItemNeedsTarget(item_id.to_string()));
        }

        let totals = self.stat_totals(catalog, quests);
        let mut usage = ItemUse {
            item_id: item.id.clone(),
            ..ItemUse::default()
        };
        for effect in &item.effects {
            match *effect {
                Effect::Heal(v) => {
                    let healed = v.min(totals.max_health.saturating_sub(self.health));
                    self.health += healed;
                    usage.healed += healed;
                }
                Effect::ManaRestore(v) => {
                    let restored = v.min(totals.max_mana.saturating_sub(self.mana));
                    self.mana += restored;
                    usage.mana_restored += restored;
                }
                _ => {}
            }
        }
        self.inventory.remove_item(item_id, 1);

        tracing::debug!(player = %self.id, item = %item_id, healed = usage.healed, mana = usage.mana_restored, "item used");
        Ok(usage)
    }

    pub fn unlock_title(&mut self, title_id: impl Into<String>) -> bool {
        self.titles.insert(title_id.into())
    }

    /// Make an unlocked title active. Returns false if it is not unlocked.
    pub fn set_active_title(&mut self, title_id: Option<&str>) -> bool {
        match title_id {
            Some(id) if !self.titles.contains(id) => false,
            Some(id) => {
                self.active_title = Some(id.to_string());
                true
            }
            None => {
                self.active_title = None;
                true
            }
        }
    }
}
