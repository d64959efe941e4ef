//! GearSource - Stats from equipped items

use crate::item::Item;
use crate::source::{StatAccumulator, StatSource};
use crate::types::EquipmentSlot;

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a Item,
}

impl<'a> GearSource<'a> {
    pub fn new(slot: EquipmentSlot, item: &'a Item) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for effect in &self.item.effects {
            stats.apply_effect(effect);
        }
    }
}
