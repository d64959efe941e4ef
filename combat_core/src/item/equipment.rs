//! Equipment - Item ids equipped per slot

use super::{Inventory, Item, ItemCatalog};
use crate::error::EquipError;
use crate::source::{GearSource, StatAccumulator, StatSource};
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Equipped item ids by slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    slots: HashMap<EquipmentSlot, String>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn can_equip(item: &Item, slot: EquipmentSlot) -> bool {
        item.kind == slot.accepts()
    }

    /// Put an item in a slot, returning the id it replaced
    pub fn equip(
        &mut self,
        item: &Item,
        slot: EquipmentSlot,
        level: u32,
    ) -> Result<Option<String>, EquipError> {
        if !Self::can_equip(item, slot) {
            return Err(EquipError::WrongSlot {
                item: item.id.clone(),
                slot,
            });
        }
        if item.level_requirement > level {
            return Err(EquipError::LevelTooLow {
                item: item.id.clone(),
                required: item.level_requirement,
            });
        }
        Ok(self.slots.insert(slot, item.id.clone()))
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<String> {
        self.slots.remove(&slot)
    }

    /// Gear sources for every equipped item the catalog knows.
    /// Unknown ids are skipped with a warning.
    pub fn sources<'a>(&self, catalog: &'a ItemCatalog) -> Vec<GearSource<'a>> {
        let mut sources = Vec::with_capacity(self.slots.len());
        for slot in EquipmentSlot::all() {
            let Some(id) = self.slots.get(slot) else {
                continue;
            };
            match catalog.get(id) {
                Some(item) => sources.push(GearSource::new(*slot, item)),
                None => tracing::warn!(item = %id, ?slot, "equipped item missing from catalog, ignoring"),
            }
        }
        sources
    }

    /// Summed bonuses of all equipped gear
    pub fn total_bonuses(&self, catalog: &ItemCatalog) -> StatAccumulator {
        let mut acc = StatAccumulator::new();
        for source in self.sources(catalog) {
            source.apply(&mut acc);
        }
        acc
    }

    /// Equip the best-scoring usable item from the inventory in every slot
    /// where it beats the current one. Replaced items go back to the
    /// inventory. Returns the slots that changed.
    pub fn auto_equip(
        &mut self,
        inventory: &mut Inventory,
        catalog: &ItemCatalog,
        level: u32,
    ) -> Vec<EquipmentSlot> {
        let mut changed = Vec::new();

        for slot in EquipmentSlot::all() {
            let current = self.get(*slot).and_then(|id| catalog.get(id));
            let mut best_score = current.map(Item::score).unwrap_or(0.0);
            let mut best: Option<&Item> = None;

            for (id, _) in inventory.iter() {
                let Some(item) = catalog.get(id) else {
                    continue;
                };
                if !Self::can_equip(item, *slot) || item.level_requirement > level {
                    continue;
                }
                // No duplicate rings across both ring slots
                if let Some(other) = other_ring(*slot) {
                    if self.get(other) == Some(id) {
                        continue;
                    }
                }
                let score = item.score();
                if score > best_score {
                    best_score = score;
                    best = Some(item);
                }
            }

            let Some(item) = best else {
                continue;
            };
            if !inventory.remove_item(&item.id, 1) {
                continue;
            }
            match self.equip(item, *slot, level) {
                Ok(None) => {}
                Ok(Some(previous)) => match catalog.get(&previous) {
                    Some(previous_item) if inventory.add_item(previous_item, 1, level) == 0 => {
                        // No room for the replaced item; undo the swap
                        tracing::debug!(item = %item.id, ?slot, "inventory full, keeping current gear");
                        self.slots.insert(*slot, previous);
                        inventory.add_item(item, 1, level);
                        continue;
                    }
                    Some(_) => {}
                    None => tracing::warn!(item = %previous, ?slot, "replaced item missing from catalog, dropping"),
                },
                Err(_) => {
                    inventory.add_item(item, 1, level);
                    continue;
                }
            }
            changed.push(*slot);
        }

        changed
    }
}

fn other_ring(slot: EquipmentSlot) -> Option<EquipmentSlot> {
    match slot {
        EquipmentSlot::Ring1 => Some(EquipmentSlot::Ring2),
        EquipmentSlot::Ring2 => Some(EquipmentSlot::Ring1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures;
    use crate::types::{Effect, ItemKind, Rarity};

    #[test]
    fn test_equip_checks_slot_and_level() {
        let catalog = fixtures::catalog();
        let sword = catalog.get("rusty_sword").unwrap();
        let mut equipment = Equipment::new();

        assert!(matches!(
            equipment.equip(sword, EquipmentSlot::Helmet, 1),
            Err(EquipError::WrongSlot { .. })
        ));

        let mut heavy = sword.clone();
        heavy.level_requirement = 10;
        assert!(matches!(
            equipment.equip(&heavy, EquipmentSlot::Weapon, 3),
            Err(EquipError::LevelTooLow { required: 10, .. })
        ));

        assert_eq!(equipment.equip(sword, EquipmentSlot::Weapon, 1), Ok(None));
        assert_eq!(equipment.get(EquipmentSlot::Weapon), Some("rusty_sword"));
    }

    #[test]
    fn test_total_bonuses_skips_unknown_ids() {
        let catalog = fixtures::catalog();
        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("rusty_sword").unwrap(), EquipmentSlot::Weapon, 1).unwrap();
        equipment.equip(catalog.get("iron_helm").unwrap(), EquipmentSlot::Helmet, 1).unwrap();
        equipment.slots.insert(EquipmentSlot::Boots, "removed_boots".to_string());

        let totals = equipment.total_bonuses(&catalog);
        assert_eq!(totals.bonuses.damage, 3);
        assert_eq!(totals.bonuses.defense, 4);
    }

    #[test]
    fn test_auto_equip_picks_better_gear() {
        let mut catalog = fixtures::catalog();
        catalog.register(fixtures::item(
            "steel_sword",
            ItemKind::Weapon,
            Rarity::Common,
            vec![Effect::DamageBonus(8)],
        ));
        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("rusty_sword").unwrap(), EquipmentSlot::Weapon, 1).unwrap();

        let mut inventory = Inventory::new();
        inventory.add_item(catalog.get("steel_sword").unwrap(), 1, 1);
        inventory.add_item(catalog.get("health_potion").unwrap(), 3, 1);

        let changed = equipment.auto_equip(&mut inventory, &catalog, 1);

        assert_eq!(changed, vec![EquipmentSlot::Weapon]);
        assert_eq!(equipment.get(EquipmentSlot::Weapon), Some("steel_sword"));
        assert!(inventory.contains("rusty_sword"));
        assert!(!inventory.contains("steel_sword"));
        assert_eq!(inventory.count("health_potion"), 3);
    }

    #[test]
    fn test_auto_equip_keeps_gear_when_inventory_full() {
        let mut catalog = fixtures::catalog();
        let mut steel = fixtures::item("steel_sword", ItemKind::Weapon, Rarity::Common, vec![Effect::DamageBonus(8)]);
        steel.stackable = true;
        catalog.register(steel);
        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("rusty_sword").unwrap(), EquipmentSlot::Weapon, 1).unwrap();

        let mut inventory = Inventory::new();
        inventory.add_item(catalog.get("steel_sword").unwrap(), 2, 1);
        let filler_base = catalog.get("wolf_pelt").unwrap().clone();
        for i in 1..Inventory::max_slots(1) {
            let mut filler = filler_base.clone();
            filler.id = format!("filler_{}", i);
            inventory.add_item(&filler, 1, 1);
        }
        assert!(!inventory.has_space(1));

        let changed = equipment.auto_equip(&mut inventory, &catalog, 1);

        assert!(changed.is_empty());
        assert_eq!(equipment.get(EquipmentSlot::Weapon), Some("rusty_sword"));
        assert_eq!(inventory.count("steel_sword"), 2);
        assert!(!inventory.contains("rusty_sword"));
    }

    #[test]
    fn test_auto_equip_swaps_when_last_copy_frees_slot() {
        let mut catalog = fixtures::catalog();
        catalog.register(fixtures::item("steel_sword", ItemKind::Weapon, Rarity::Common, vec![Effect::DamageBonus(8)]));
        let mut equipment = Equipment::new();
        equipment.equip(catalog.get("rusty_sword").unwrap(), EquipmentSlot::Weapon, 1).unwrap();

        let mut inventory = Inventory::new();
        inventory.add_item(catalog.get("steel_sword").unwrap(), 1, 1);
        let filler_base = catalog.get("wolf_pelt").unwrap().clone();
        for i in 1..Inventory::max_slots(1) {
            let mut filler = filler_base.clone();
            filler.id = format!("filler_{}", i);
            inventory.add_item(&filler, 1, 1);
        }

        let changed = equipment.auto_equip(&mut inventory, &catalog, 1);

        assert_eq!(changed, vec![EquipmentSlot::Weapon]);
        assert_eq!(equipment.get(EquipmentSlot::Weapon), Some("steel_sword"));
        assert!(inventory.contains("rusty_sword"));
    }

    #[test]
    fn test_auto_equip_single_ring_goes_to_one_slot() {
        let catalog = fixtures::catalog();
        let mut equipment = Equipment::new();
        let mut inventory = Inventory::new();
        inventory.add_item(catalog.get("mage_ring").unwrap(), 1, 1);

        let changed = equipment.auto_equip(&mut inventory, &catalog, 1);

        assert_eq!(changed, vec![EquipmentSlot::Ring1]);
        assert_eq!(equipment.get(EquipmentSlot::Ring2), None);
    }
}
