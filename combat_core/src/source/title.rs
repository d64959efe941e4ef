//! TitleSource - Bonuses from the player's active title

use crate::progression::Title;
use crate::source::{StatAccumulator, StatSource};

pub struct TitleSource<'a> {
    pub title: &'a Title,
}

impl<'a> TitleSource<'a> {
    pub fn new(title: &'a Title) -> Self {
        TitleSource { title }
    }
}

impl StatSource for TitleSource<'_> {
    fn id(&self) -> &str {
        &self.title.id
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for effect in &self.title.bonuses {
            stats.apply_effect(effect);
        }
    }
}
