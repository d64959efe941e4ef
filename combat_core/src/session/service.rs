//! CombatService - Session store keyed by player id

use super::encounter::CombatSession;
use super::report::{ItemUse, RoundReport};
use super::state::PlayerAction;
use crate::config::GameData;
use crate::enemy::EnemyGenerator;
use crate::error::CombatError;
use crate::player::PlayerProfile;
use crate::progression::QuestLog;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player's action tagged with the round it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTurn {
    pub round: u32,
    pub action: PlayerAction,
}

impl PlayerTurn {
    pub fn new(round: u32, action: PlayerAction) -> Self {
        PlayerTurn { round, action }
    }
}

/// Owns the static data and every live encounter. At most one session per
/// player; finished sessions are dropped as soon as they end.
pub struct CombatService {
    data: GameData,
    generator: EnemyGenerator,
    sessions: HashMap<String, CombatSession>,
}

impl CombatService {
    pub fn new(data: GameData) -> Self {
        let generator = EnemyGenerator::new(data.enemies.clone(), data.constants.generation.clone());
        CombatService {
            data,
            generator,
            sessions: HashMap::new(),
        }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn session(&self, player_id: &str) -> Option<&CombatSession> {
        self.sessions.get(player_id)
    }

    pub fn is_in_combat(&self, player_id: &str) -> bool {
        self.sessions.contains_key(player_id)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn start_combat(&mut self, profile: &PlayerProfile) -> Result<&CombatSession, CombatError> {
        self.start_combat_with_rng(profile, &mut rand::thread_rng())
    }

    /// Generate an enemy around the player's level and open a session
    pub fn start_combat_with_rng(
        &mut self,
        profile: &PlayerProfile,
        rng: &mut impl Rng,
    ) -> Result<&CombatSession, CombatError> {
        if self.sessions.contains_key(&profile.id) {
            return Err(CombatError::AlreadyInCombat(profile.id.clone()));
        }
        let enemy = self.generator.generate_with_rng(profile.level, rng)?;
        let player = profile.combat_entity(&self.data.items, &self.data.quests, &self.data.constants.player);

        tracing::info!(
            player = %profile.id,
            enemy = %enemy.entity.name,
            enemy_level = enemy.entity.level,
            "combat started"
        );
        let session = CombatSession::new(profile.id.clone(), player, enemy);
        let session = self.sessions.entry(profile.id.clone()).or_insert(session);
        Ok(&*session)
    }

    pub fn submit(
        &mut self,
        profile: &mut PlayerProfile,
        quests: &mut QuestLog,
        turn: PlayerTurn,
    ) -> Result<RoundReport, CombatError> {
        self.submit_with_rng(profile, quests, turn, &mut rand::thread_rng())
    }

    /// Resolve a turn. A turn for any round other than the one the session
    /// is waiting on is rejected, so a duplicate submission never resolves
    /// twice.
    pub fn submit_with_rng(
        &mut self,
        profile: &mut PlayerProfile,
        quests: &mut QuestLog,
        turn: PlayerTurn,
        rng: &mut impl Rng,
    ) -> Result<RoundReport, CombatError> {
        let session = self
            .sessions
            .get_mut(&profile.id)
            .ok_or_else(|| CombatError::NotInCombat(profile.id.clone()))?;
        if turn.round != session.round() {
            return Err(CombatError::StaleTurn {
                expected: session.round(),
                received: turn.round,
            });
        }

        let report = session.act(turn.action, profile, quests, &self.data, rng)?;
        if session.is_finished() {
            self.sessions.remove(&profile.id);
            tracing::debug!(player = %profile.id, "session closed");
        }
        Ok(report)
    }

    /// Use a consumable outside combat. Players in a session must use
    /// items as their turn action instead.
    pub fn use_item(&self, profile: &mut PlayerProfile, item_id: &str) -> Result<ItemUse, CombatError> {
        if self.sessions.contains_key(&profile.id) {
            return Err(CombatError::AlreadyInCombat(profile.id.clone()));
        }
        profile.use_item(item_id, &self.data.items, &self.data.quests)
    }

    /// Drop a session without rewards, keeping the player's current vitals
    pub fn abandon(&mut self, profile: &mut PlayerProfile) -> Option<CombatSession> {
        let session = self.sessions.remove(&profile.id)?;
        profile.sync_vitals(session.player());
        tracing::info!(player = %profile.id, "combat abandoned");
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn service() -> CombatService {
        CombatService::new(GameData::builtin().unwrap())
    }

    #[test]
    fn test_one_session_per_player() {
        let mut service = service();
        let profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        service.start_combat_with_rng(&profile, &mut rng).unwrap();
        assert!(service.is_in_combat("p1"));
        assert_eq!(
            service.start_combat_with_rng(&profile, &mut rng).err(),
            Some(CombatError::AlreadyInCombat("p1".to_string()))
        );
        assert_eq!(service.active_sessions(), 1);
    }

    #[test]
    fn test_submit_without_session() {
        let mut service = service();
        let mut profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        let mut quests = QuestLog::new();

        let result = service.submit(&mut profile, &mut quests, PlayerTurn::new(1, PlayerAction::Melee));
        assert_eq!(result, Err(CombatError::NotInCombat("p1".to_string())));
    }

    #[test]
    fn test_stale_turn_rejected() {
        let mut service = service();
        let mut profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        let mut quests = QuestLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        service.start_combat_with_rng(&profile, &mut rng).unwrap();

        assert_eq!(
            service.submit_with_rng(&mut profile, &mut quests, PlayerTurn::new(2, PlayerAction::Pray), &mut rng),
            Err(CombatError::StaleTurn {
                expected: 1,
                received: 2
            })
        );
        assert_eq!(service.session("p1").unwrap().round(), 1);
    }

    #[test]
    fn test_abandon_removes_session() {
        let mut service = service();
        let mut profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        service.start_combat_with_rng(&profile, &mut rng).unwrap();

        assert!(service.abandon(&mut profile).is_some());
        assert!(!service.is_in_combat("p1"));
        assert!(service.abandon(&mut profile).is_none());
    }

    #[test]
    fn test_use_item_outside_combat_only() {
        let mut service = service();
        let mut profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        let potion = service.data().items.get("minor_health_potion").unwrap().clone();
        profile.inventory.add_item(&potion, 2, 1);
        profile.health = 50;
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        service.start_combat_with_rng(&profile, &mut rng).unwrap();
        assert_eq!(
            service.use_item(&mut profile, "minor_health_potion"),
            Err(CombatError::AlreadyInCombat("p1".to_string()))
        );
        assert_eq!(profile.inventory.count("minor_health_potion"), 2);

        service.abandon(&mut profile);
        let usage = service.use_item(&mut profile, "minor_health_potion").unwrap();
        assert!(usage.healed > 0);
        assert_eq!(profile.health, 50 + usage.healed);
        assert_eq!(profile.inventory.count("minor_health_potion"), 1);
    }

    #[test]
    fn test_no_enemy_types() {
        let mut service = CombatService::new(GameData::default());
        let profile = PlayerProfile::new("p1", "Hero", &service.data().constants.player);
        assert_eq!(
            service.start_combat(&profile).err(),
            Some(CombatError::NoEnemyTypes)
        );
        assert!(!service.is_in_combat("p1"));
    }
}
