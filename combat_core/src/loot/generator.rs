//! LootGenerator - Guaranteed drops for a defeated enemy

use super::table::roll_rarity;
use crate::config::RewardConstants;
use crate::item::{Item, ItemCatalog};
use crate::types::{ItemKind, Rarity};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub item_id: String,
    pub count: u32,
}

/// Gold and items dropped by one enemy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub gold: u32,
    pub items: Vec<LootDrop>,
}

impl Loot {
    fn push(&mut self, item: &Item) {
        match self.items.iter_mut().find(|d| d.item_id == item.id) {
            Some(drop) => drop.count += 1,
            None => self.items.push(LootDrop {
                item_id: item.id.clone(),
                count: 1,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Restores {
    Health,
    Mana,
}

impl Restores {
    fn matches(self, item: &Item) -> bool {
        match self {
            Restores::Health => item.restores_health(),
            Restores::Mana => item.restores_mana(),
        }
    }
}

pub struct LootGenerator<'a> {
    catalog: &'a ItemCatalog,
    constants: &'a RewardConstants,
}

impl<'a> LootGenerator<'a> {
    pub fn new(catalog: &'a ItemCatalog, constants: &'a RewardConstants) -> Self {
        LootGenerator { catalog, constants }
    }

    pub fn roll(&self, enemy_level: u32) -> Loot {
        self.roll_with_rng(enemy_level, &mut rand::thread_rng())
    }

    /// One equipment piece and one potion, both tiered by enemy level, a
    /// chance of a bonus potion, and `[15L, 30L]` gold
    pub fn roll_with_rng(&self, enemy_level: u32, rng: &mut impl Rng) -> Loot {
        let mut loot = Loot {
            gold: self.roll_gold(enemy_level, rng),
            items: Vec::new(),
        };

        let rarity = roll_rarity(enemy_level, rng);
        match self.pick_equipment(rarity, rng) {
            Some(item) => loot.push(item),
            None => tracing::warn!("item catalog has no equipment, skipping equipment drop"),
        }

        match self.pick_potion(enemy_level, rng) {
            Some(item) => loot.push(item),
            None => tracing::warn!("item catalog has no potions, skipping consumable drop"),
        }

        if rng.gen::<f64>() < self.constants.bonus_consumable_chance {
            if let Some(item) = self.pick_potion(enemy_level, rng) {
                loot.push(item);
            }
        }

        tracing::debug!(enemy_level, gold = loot.gold, items = loot.items.len(), "loot rolled");
        loot
    }

    fn roll_gold(&self, enemy_level: u32, rng: &mut impl Rng) -> u32 {
        let level = enemy_level.max(1);
        let [a, b] = self.constants.gold_per_level;
        let lo = a.min(b).max(1).saturating_mul(level);
        let hi = a.max(b).max(1).saturating_mul(level);
        rng.gen_range(lo..=hi)
    }

    fn pick_equipment(&self, rarity: Rarity, rng: &mut impl Rng) -> Option<&'a Item> {
        let tiered = self
            .catalog
            .filter(move |i| i.kind.is_equipment() && i.rarity == rarity);
        if let Some(item) = tiered.choose(rng) {
            return Some(*item);
        }
        tracing::warn!(?rarity, "no equipment of rolled rarity, using any equipment");
        self.catalog
            .filter(|i| i.kind.is_equipment())
            .choose(rng)
            .copied()
    }

    fn pick_potion(&self, enemy_level: u32, rng: &mut impl Rng) -> Option<&'a Item> {
        let restores = if rng.gen_bool(0.5) {
            Restores::Health
        } else {
            Restores::Mana
        };
        let rarity = roll_rarity(enemy_level, rng);

        let is_potion = move |i: &Item| i.kind == ItemKind::Consumable && restores.matches(i);
        let tiered = self.catalog.filter(move |i| is_potion(i) && i.rarity == rarity);
        if let Some(item) = tiered.choose(rng) {
            return Some(*item);
        }
        tracing::warn!(?rarity, ?restores, "no potion of rolled rarity, using any tier");
        let any_tier = self.catalog.filter(is_potion);
        if let Some(item) = any_tier.choose(rng) {
            return Some(*item);
        }
        self.catalog
            .filter(|i| i.kind == ItemKind::Consumable && (i.restores_health() || i.restores_mana()))
            .choose(rng)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn kinds(loot: &Loot, catalog: &ItemCatalog) -> Vec<ItemKind> {
        loot.items
            .iter()
            .map(|d| catalog.get(&d.item_id).unwrap().kind)
            .collect()
    }

    #[test]
    fn test_loot_always_has_gear_and_potion() {
        let catalog = fixtures::catalog();
        let constants = RewardConstants::default();
        let generator = LootGenerator::new(&catalog, &constants);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for level in 1..=12 {
            for _ in 0..20 {
                let loot = generator.roll_with_rng(level, &mut rng);
                let kinds = kinds(&loot, &catalog);
                assert!(kinds.iter().any(|k| k.is_equipment()), "level {level}: {loot:?}");
                assert!(kinds.contains(&ItemKind::Consumable), "level {level}: {loot:?}");
                assert!(loot.gold >= 15 * level && loot.gold <= 30 * level);
            }
        }
    }

    #[test]
    fn test_low_level_drops_basic_gear() {
        let catalog = fixtures::catalog();
        let constants = RewardConstants::default();
        let generator = LootGenerator::new(&catalog, &constants);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for _ in 0..50 {
            let loot = generator.roll_with_rng(2, &mut rng);
            for drop in &loot.items {
                let item = catalog.get(&drop.item_id).unwrap();
                if item.kind.is_equipment() {
                    assert_eq!(item.rarity, Rarity::Basic);
                }
            }
        }
    }

    #[test]
    fn test_bonus_potion_chance() {
        let catalog = fixtures::catalog();
        let constants = RewardConstants::default();
        let generator = LootGenerator::new(&catalog, &constants);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let with_bonus = (0..2_000)
            .filter(|_| {
                let loot = generator.roll_with_rng(1, &mut rng);
                loot.items.iter().map(|d| d.count).sum::<u32>() == 3
            })
            .count();
        // ~30%
        assert!((450..750).contains(&with_bonus), "bonus drops: {with_bonus}");
    }

    #[test]
    fn test_empty_catalog_still_drops_gold() {
        let catalog = ItemCatalog::new();
        let constants = RewardConstants::default();
        let generator = LootGenerator::new(&catalog, &constants);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let loot = generator.roll_with_rng(3, &mut rng);
        assert!(loot.items.is_empty());
        assert!(loot.gold >= 45);
    }
}
