//! CombatSession - One player against one generated enemy

use super::ai::{self, EnemyDecision};
use super::report::{CombatOutcome, ItemUse, RoundReport, TurnAction, TurnEvent};
use super::rewards;
use super::state::{CombatState, PlayerAction};
use crate::combat::resolve_attack_with_rng;
use crate::config::GameData;
use crate::enemy::GeneratedEnemy;
use crate::entity::{Attack, CombatEntity};
use crate::error::CombatError;
use crate::item::Item;
use crate::player::PlayerProfile;
use crate::progression::QuestLog;
use crate::types::{AttackKind, Combatant, Effect};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A validated player action, ready to resolve
enum Planned<'d> {
    Attack(Attack),
    Item(&'d Item),
    Pray,
    Flee,
}

/// Where a half-round left the fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    EnemyDefeated,
    PlayerDefeated,
    Fled,
}

/// Live encounter state between turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSession {
    player_id: String,
    player: CombatEntity,
    enemy: GeneratedEnemy,
    state: CombatState,
    /// The round the next player action answers, starting at 1
    round: u32,
    last_attack: Option<AttackKind>,
    enemy_fled: bool,
}

impl CombatSession {
    pub fn new(player_id: impl Into<String>, player: CombatEntity, enemy: GeneratedEnemy) -> Self {
        CombatSession {
            player_id: player_id.into(),
            player,
            enemy,
            state: CombatState::AwaitingPlayerAction,
            round: 1,
            last_attack: None,
            enemy_fled: false,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn player(&self) -> &CombatEntity {
        &self.player
    }

    pub fn enemy(&self) -> &GeneratedEnemy {
        &self.enemy
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Category of the player's most recent attack this encounter
    pub fn last_attack(&self) -> Option<AttackKind> {
        self.last_attack
    }

    pub fn enemy_fled(&self) -> bool {
        self.enemy_fled
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Resolve one player action and, unless the fight ended, the enemy's
    /// reply. A rejected action returns an error and changes nothing.
    pub fn act(
        &mut self,
        action: PlayerAction,
        profile: &mut PlayerProfile,
        quests: &mut QuestLog,
        data: &GameData,
        rng: &mut impl Rng,
    ) -> Result<RoundReport, CombatError> {
        if self.state != CombatState::AwaitingPlayerAction {
            return Err(CombatError::NotInCombat(self.player_id.clone()));
        }
        let planned = self.plan(&action, profile, data)?;

        let round = self.round;
        let mut events = Vec::new();
        tracing::debug!(player = %self.player_id, round, ?action, "player action");

        let mut step = self.player_turn(planned, profile, data, &mut events, rng);
        if step == Step::Continue {
            step = self.enemy_turn(data, &mut events, rng);
        }

        let outcome = match step {
            Step::Continue => {
                self.transition(CombatState::AwaitingPlayerAction);
                self.round += 1;
                profile.sync_vitals(&self.player);
                None
            }
            Step::EnemyDefeated => {
                self.transition(CombatState::EnemyDefeated);
                let reward = rewards::resolve_victory(profile, quests, data, self, rng);
                Some(CombatOutcome::Victory(reward))
            }
            Step::PlayerDefeated => {
                self.transition(CombatState::PlayerDefeated);
                let report = rewards::resolve_defeat(profile, &mut self.player);
                Some(CombatOutcome::Defeat(report))
            }
            Step::Fled => {
                self.transition(CombatState::Fled);
                profile.sync_vitals(&self.player);
                tracing::info!(player = %self.player_id, "player fled");
                Some(CombatOutcome::Fled)
            }
        };

        Ok(RoundReport {
            round,
            events,
            outcome,
        })
    }

    fn plan<'d>(
        &self,
        action: &PlayerAction,
        profile: &PlayerProfile,
        data: &'d GameData,
    ) -> Result<Planned<'d>, CombatError> {
        match action {
            PlayerAction::Melee => self.plan_attack(AttackKind::Melee),
            PlayerAction::Magic => self.plan_attack(AttackKind::Magic),
            PlayerAction::UseItem(id) => {
                let item = data
                    .items
                    .get(id)
                    .ok_or_else(|| CombatError::UnknownItem(id.clone()))?;
                if !item.is_usable_in_combat() {
                    return Err(CombatError::ItemNotUsable(id.clone()));
                }
                if !profile.inventory.contains(id) {
                    return Err(CombatError::ItemNotInInventory(id.clone()));
                }
                Ok(Planned::Item(item))
            }
            PlayerAction::Pray => Ok(Planned::Pray),
            PlayerAction::Flee => Ok(Planned::Flee),
        }
    }

    fn plan_attack<'d>(&self, kind: AttackKind) -> Result<Planned<'d>, CombatError> {
        self.player
            .attack_of_kind(kind)
            .cloned()
            .map(Planned::Attack)
            .ok_or(CombatError::AttackUnavailable(kind))
    }

    fn player_turn(
        &mut self,
        planned: Planned<'_>,
        profile: &mut PlayerProfile,
        data: &GameData,
        events: &mut Vec<TurnEvent>,
        rng: &mut impl Rng,
    ) -> Step {
        let combat = &data.constants.combat;
        match planned {
            Planned::Attack(attack) => {
                self.transition(CombatState::ResolvingPlayerAttack);
                let outcome = resolve_attack_with_rng(&mut self.player, &mut self.enemy.entity, &attack, rng);
                self.last_attack = Some(attack.kind);
                events.push(self.event(Combatant::Player, TurnAction::Attack { outcome }));
                if !self.enemy.entity.is_alive() {
                    return Step::EnemyDefeated;
                }
                let amount = self.player.regenerate_mana(combat.player_mana_regen);
                if amount > 0 {
                    events.push(self.event(Combatant::Player, TurnAction::ManaRegen { amount }));
                }
                Step::Continue
            }
            Planned::Item(item) => {
                // Presence was checked during planning
                profile.inventory.remove_item(&item.id, 1);
                let usage = self.use_item(item);
                events.push(self.event(Combatant::Player, TurnAction::UseItem { usage }));
                if !self.enemy.entity.is_alive() {
                    Step::EnemyDefeated
                } else {
                    Step::Continue
                }
            }
            Planned::Pray => {
                let [a, b] = combat.pray_range;
                let fraction = rng.gen_range(a.min(b)..=a.max(b));
                let amount = (self.player.max_mana() as f64 * fraction).round() as u32;
                let restored = self.player.restore_mana(amount);
                events.push(self.event(Combatant::Player, TurnAction::Pray { restored }));
                Step::Continue
            }
            Planned::Flee => {
                let success = self.player.try_flee(combat.player_flee_chance, rng);
                events.push(self.event(Combatant::Player, TurnAction::Flee { success }));
                if success {
                    Step::Fled
                } else {
                    Step::Continue
                }
            }
        }
    }

    /// Apply a consumable's combat effects. Damage ignores defense.
    fn use_item(&mut self, item: &Item) -> ItemUse {
        let mut usage = ItemUse {
            item_id: item.id.clone(),
            ..ItemUse::default()
        };
        for effect in &item.effects {
            match *effect {
                Effect::Heal(v) => usage.healed += self.player.heal(v),
                Effect::ManaRestore(v) => usage.mana_restored += self.player.restore_mana(v),
                Effect::Damage(v) => usage.damage_dealt += self.enemy.entity.take_damage(v),
                _ => {}
            }
        }
        usage
    }

    fn enemy_turn(&mut self, data: &GameData, events: &mut Vec<TurnEvent>, rng: &mut impl Rng) -> Step {
        let combat = &data.constants.combat;
        self.transition(CombatState::AwaitingEnemyAction);
        self.transition(CombatState::ResolvingEnemyAction);

        let amount = self.enemy.entity.regenerate_mana(combat.enemy_mana_regen);
        if amount > 0 {
            events.push(self.event(Combatant::Enemy, TurnAction::ManaRegen { amount }));
        }

        let decision = ai::decide(&self.enemy.entity, rng);
        tracing::debug!(enemy = %self.enemy.entity.name, ?decision, "enemy decision");
        match decision {
            EnemyDecision::Attack => self.enemy_attack(events, rng),
            EnemyDecision::Heal => {
                let [a, b] = combat.enemy_heal_range;
                let roll = rng.gen_range(a.min(b)..=a.max(b));
                let amount = self.enemy.entity.heal(roll);
                events.push(self.event(Combatant::Enemy, TurnAction::Heal { amount }));
            }
            EnemyDecision::Flee => {
                let success = self.enemy.entity.try_flee(combat.enemy_flee_success, rng);
                events.push(self.event(Combatant::Enemy, TurnAction::Flee { success }));
                if success {
                    self.enemy.entity.set_defeated();
                    self.enemy_fled = true;
                    return Step::EnemyDefeated;
                }
                self.enemy_attack(events, rng);
            }
        }

        if self.player.is_alive() {
            Step::Continue
        } else {
            Step::PlayerDefeated
        }
    }

    fn enemy_attack(&mut self, events: &mut Vec<TurnEvent>, rng: &mut impl Rng) {
        let Some(attack) = ai::choose_attack(&self.enemy.entity, rng).cloned() else {
            events.push(self.event(Combatant::Enemy, TurnAction::Idle));
            return;
        };
        let outcome = resolve_attack_with_rng(&mut self.enemy.entity, &mut self.player, &attack, rng);
        events.push(self.event(Combatant::Enemy, TurnAction::Attack { outcome }));
    }

    fn event(&self, actor: Combatant, action: TurnAction) -> TurnEvent {
        TurnEvent {
            actor,
            action,
            player_health: self.player.health(),
            player_mana: self.player.mana(),
            enemy_health: self.enemy.entity.health(),
            enemy_mana: self.enemy.entity.mana(),
        }
    }

    fn transition(&mut self, next: CombatState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = ?self.state, to = ?next, "unexpected combat state transition");
        }
        self.state = next;
    }
}
