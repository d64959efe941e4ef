//! Items - Catalog, inventory and equipment

mod equipment;
mod inventory;

pub use equipment::Equipment;
pub use inventory::Inventory;

use crate::types::{Effect, ItemKind, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    #[serde(default = "default_level_requirement")]
    pub level_requirement: u32,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub value: u32,
    #[serde(default = "default_stackable")]
    pub stackable: bool,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

fn default_level_requirement() -> u32 {
    1
}
fn default_stackable() -> bool {
    true
}
fn default_max_stack() -> u32 {
    99
}

impl Item {
    /// Largest count a single inventory slot holds
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }

    /// A consumable with at least one combat-usable effect
    pub fn is_usable_in_combat(&self) -> bool {
        self.kind == ItemKind::Consumable && self.effects.iter().any(Effect::is_usable)
    }

    pub fn restores_health(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Heal(_)))
    }

    pub fn restores_mana(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::ManaRestore(_)))
    }

    /// Weighted equipment score plus rarity tie-break
    pub fn score(&self) -> f64 {
        self.effects.iter().map(Effect::score).sum::<f64>() + self.rarity.score_bonus()
    }
}

/// Container for item configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsConfig {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// All known items by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
        }
    }

    pub fn register(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Items matching a predicate, sorted by id so random picks are reproducible
    pub fn filter<'a>(&'a self, pred: impl Fn(&Item) -> bool + 'a) -> Vec<&'a Item> {
        let mut found: Vec<&Item> = self.items.values().filter(|i| pred(i)).collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }
}

impl From<ItemsConfig> for ItemCatalog {
    fn from(config: ItemsConfig) -> Self {
        let mut catalog = ItemCatalog::new();
        for item in config.items {
            catalog.register(item);
        }
        catalog
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let toml = r#"
[[items]]
id = "health_potion"
name = "Health Potion"
kind = "consumable"
rarity = "common"
max_stack = 20
effects = [{ type = "heal", value = 50 }]

[[items]]
id = "rusty_sword"
name = "Rusty Sword"
kind = "weapon"
rarity = "basic"
stackable = false
effects = [{ type = "damage_bonus", value = 5 }]
"#;

        let config: ItemsConfig = toml::from_str(toml).unwrap();
        let catalog = ItemCatalog::from(config);
        assert_eq!(catalog.len(), 2);

        let potion = catalog.get("health_potion").unwrap();
        assert!(potion.is_usable_in_combat());
        assert_eq!(potion.stack_limit(), 20);
        assert_eq!(potion.level_requirement, 1);

        let sword = catalog.get("rusty_sword").unwrap();
        assert!(!sword.is_usable_in_combat());
        assert_eq!(sword.stack_limit(), 1);
    }

    #[test]
    fn test_item_score() {
        let catalog = fixtures::catalog();
        let ring = catalog.get("mage_ring").unwrap();
        // 5 * 2 + 5 * 3 + uncommon 1
        assert!((ring.score() - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_is_sorted() {
        let catalog = fixtures::catalog();
        let consumables = catalog.filter(|i| i.kind == ItemKind::Consumable);
        let ids: Vec<&str> = consumables.iter().map(|i| i.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 5);
    }
}
