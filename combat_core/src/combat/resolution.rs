//! Attack resolution - Apply an attack from one entity to another

use super::result::AttackOutcome;
use crate::entity::{clamp_chance, Attack, CombatEntity};
use crate::types::AttackKind;
use rand::Rng;

/// Critical hits double damage
pub const CRIT_MULTIPLIER: f64 = 2.0;

/// Resolve an attack using the thread RNG
pub fn resolve_attack(
    attacker: &mut CombatEntity,
    defender: &mut CombatEntity,
    attack: &Attack,
) -> AttackOutcome {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(attacker, defender, attack, &mut rng)
}

/// Resolve an attack with a provided RNG (for deterministic testing)
///
/// 1. Insufficient mana short-circuits with no side effects
/// 2. Mana is spent, then the miss roll happens
/// 3. Rolled damage plus the attacker's flat bonus for the category
/// 4. Crit roll at `crit * crit multiplier + crit bonus`, doubling damage
/// 5. Attacker damage multipliers (magic attacks also take the magic one)
/// 6. Defender defense for the category, floored at 0, then rounded
pub fn resolve_attack_with_rng(
    attacker: &mut CombatEntity,
    defender: &mut CombatEntity,
    attack: &Attack,
    rng: &mut impl Rng,
) -> AttackOutcome {
    // Step 1: mana check
    if !attacker.try_spend_mana(attack.mana_cost) {
        return AttackOutcome::insufficient_mana(&attacker.name, &attack.name, attack.kind);
    }

    // Step 2: miss roll, mana stays spent
    if rng.gen::<f64>() < attack.miss_chance {
        tracing::debug!(attacker = %attacker.name, attack = %attack.name, "attack missed");
        return AttackOutcome::miss(&attacker.name, &attack.name, attack.kind, attack.mana_cost);
    }

    // Step 3: base damage plus flat bonus
    let rolled = rng.gen_range(attack.damage.min..=attack.damage.max);
    let base = rolled + attacker.bonuses.damage_for(attack.kind);

    // Step 4: crit
    let crit_chance = clamp_chance(
        &attacker.name,
        "crit",
        attack.crit_chance * attacker.multipliers.crit_chance + attacker.bonuses.crit_chance,
    );
    let is_crit = rng.gen::<f64>() < crit_chance;
    let mut damage = base as f64;
    if is_crit {
        damage *= CRIT_MULTIPLIER;
    }

    // Step 5: multipliers
    damage *= attacker.multipliers.damage;
    if attack.kind == AttackKind::Magic {
        damage *= attacker.multipliers.magic_damage;
    }

    // Step 6: defense, floor, round
    let defense = defender.bonuses.defense_against(attack.kind) as f64;
    let final_damage = (damage - defense).max(0.0).round() as u32;
    let dealt = defender.take_damage(final_damage);

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attack = %attack.name,
        rolled,
        is_crit,
        damage = dealt,
        "attack resolved"
    );

    AttackOutcome::hit(
        &attacker.name,
        &attack.name,
        attack.kind,
        attack.mana_cost,
        dealt,
        is_crit,
    )
}
