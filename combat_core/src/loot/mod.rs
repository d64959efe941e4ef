//! Loot - Level-banded guaranteed drops

mod generator;
mod table;

pub use generator::{Loot, LootDrop, LootGenerator};
pub use table::{rarity_weights, roll_rarity};
