//! Leveling - XP thresholds and looped level-up resolution

use crate::config::ProgressionConstants;
use serde::{Deserialize, Serialize};

/// A level transition produced by an XP gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level - self.old_level
    }
}

/// XP required to leave `level`
pub fn xp_needed_for_level(level: u32, constants: &ProgressionConstants) -> u32 {
    level.max(1).saturating_mul(constants.xp_per_level)
}

/// Consume thresholds until `xp` is below the current level's threshold.
/// Returns the resulting `(level, xp)`.
pub fn settle_xp(level: u32, xp: u32, constants: &ProgressionConstants) -> (u32, u32) {
    let mut level = level.max(1);
    let mut xp = xp;
    if constants.xp_per_level == 0 {
        return (level, xp);
    }
    loop {
        let needed = xp_needed_for_level(level, constants);
        if xp < needed {
            return (level, xp);
        }
        xp -= needed;
        level += 1;
    }
}
