//! BaseStatsSource - Max health and mana earned through levels

use crate::source::{StatAccumulator, StatSource};

/// The player's level-derived maxima before gear
pub struct BaseStatsSource {
    pub max_health: u32,
    pub max_mana: u32,
}

impl BaseStatsSource {
    pub fn new(max_health: u32, max_mana: u32) -> Self {
        BaseStatsSource {
            max_health,
            max_mana,
        }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.max_health += self.max_health;
        stats.max_mana += self.max_mana;
    }
}
