//! Rarity bands by enemy level

use crate::types::Rarity;
use rand::seq::SliceRandom;
use rand::Rng;

const LOW_BAND: &[(Rarity, u32)] = &[(Rarity::Basic, 100)];
const MID_BAND: &[(Rarity, u32)] = &[(Rarity::Common, 60), (Rarity::Basic, 40)];
const HIGH_BAND: &[(Rarity, u32)] = &[
    (Rarity::Uncommon, 50),
    (Rarity::Common, 35),
    (Rarity::Basic, 15),
];

/// Weighted rarities for an enemy level: up to 3 basic only, 4-6 mostly
/// common, 7 and above mostly uncommon
pub fn rarity_weights(enemy_level: u32) -> &'static [(Rarity, u32)] {
    match enemy_level {
        0..=3 => LOW_BAND,
        4..=6 => MID_BAND,
        _ => HIGH_BAND,
    }
}

pub fn roll_rarity(enemy_level: u32, rng: &mut impl Rng) -> Rarity {
    rarity_weights(enemy_level)
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(rarity, _)| *rarity)
        .unwrap_or(Rarity::Basic)
}
