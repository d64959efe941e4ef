//! Inventory - Level-scaled stacking item storage

use super::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BASE_SLOTS: usize = 20;
const SLOTS_PER_FIVE_LEVELS: usize = 2;

/// Item counts by id; one slot per distinct item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    slots: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 20 slots plus 2 for every 5 levels
    pub fn max_slots(level: u32) -> usize {
        BASE_SLOTS + (level as usize / 5) * SLOTS_PER_FIVE_LEVELS
    }

    pub fn used_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn has_space(&self, level: u32) -> bool {
        self.used_slots() < Self::max_slots(level)
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.slots.get(item_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.count(item_id) > 0
    }

    /// Store up to `count` of an item, respecting the stack limit and free
    /// slots. Returns how many were stored.
    pub fn add_item(&mut self, item: &Item, count: u32, level: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        let existing = self.slots.get(&item.id).copied();
        if existing.is_none() && !self.has_space(level) {
            return 0;
        }
        let current = existing.unwrap_or(0);
        let room = item.stack_limit().saturating_sub(current);
        let stored = count.min(room);
        if stored > 0 {
            self.slots.insert(item.id.clone(), current + stored);
        }
        stored
    }

    /// Remove `count` of an item. Fails without change if fewer are held.
    pub fn remove_item(&mut self, item_id: &str, count: u32) -> bool {
        let Some(current) = self.slots.get_mut(item_id) else {
            return false;
        };
        if *current < count {
            return false;
        }
        *current -= count;
        if *current == 0 {
            self.slots.remove(item_id);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.slots.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures;

    #[test]
    fn test_max_slots_scale_with_level() {
        assert_eq!(Inventory::max_slots(1), 20);
        assert_eq!(Inventory::max_slots(5), 22);
        assert_eq!(Inventory::max_slots(14), 24);
    }

    #[test]
    fn test_stacking_respects_limit() {
        let catalog = fixtures::catalog();
        let potion = catalog.get("health_potion").unwrap();
        let mut inventory = Inventory::new();

        assert_eq!(inventory.add_item(potion, 15, 1), 15);
        // max_stack is 20
        assert_eq!(inventory.add_item(potion, 10, 1), 5);
        assert_eq!(inventory.count("health_potion"), 20);
    }

    #[test]
    fn test_non_stackable_holds_one() {
        let catalog = fixtures::catalog();
        let sword = catalog.get("rusty_sword").unwrap();
        let mut inventory = Inventory::new();

        assert_eq!(inventory.add_item(sword, 2, 1), 1);
        assert_eq!(inventory.add_item(sword, 1, 1), 0);
    }

    #[test]
    fn test_full_inventory_rejects_new_items() {
        let catalog = fixtures::catalog();
        let potion = catalog.get("health_potion").unwrap();
        let mut inventory = Inventory::new();
        for i in 0..Inventory::max_slots(1) {
            let mut filler = potion.clone();
            filler.id = format!("filler_{}", i);
            inventory.add_item(&filler, 1, 1);
        }

        assert_eq!(inventory.add_item(potion, 1, 1), 0);
        assert!(!inventory.contains("health_potion"));
    }

    #[test]
    fn test_remove_item() {
        let catalog = fixtures::catalog();
        let potion = catalog.get("health_potion").unwrap();
        let mut inventory = Inventory::new();
        inventory.add_item(potion, 2, 1);

        assert!(!inventory.remove_item("health_potion", 3));
        assert_eq!(inventory.count("health_potion"), 2);
        assert!(inventory.remove_item("health_potion", 2));
        assert!(!inventory.contains("health_potion"));
        assert_eq!(inventory.used_slots(), 0);
    }
}
