//! Damage policies
//!
//! Two player-side formulas survive from successive balance passes and are
//! kept as explicitly named policies rather than silently merged:
//!
//! - [`matchup_damage`] rewards a level advantage over the defender and is
//!   canonical for PvP.
//! - [`class_damage`] rewards class choice and raw level and is canonical
//!   for the player side of PvE.
//!
//! Adversaries always use [`adversary_damage`].

use rand::Rng;

use crate::combatant::Combatant;

/// Minimum damage any policy can produce
pub const MIN_DAMAGE: i32 = 5;

/// Level-matchup damage: `uniform(8..=15) + 2 per level of advantage`.
///
/// Canonical policy for PvP exchanges.
pub fn matchup_damage(attacker: &Combatant, defender: &Combatant, rng: &mut impl Rng) -> i32 {
    let base = rng.gen_range(8..=15);
    let level_bonus = attacker.level.saturating_sub(defender.level) as i32 * 2;
    (base + level_bonus).max(MIN_DAMAGE)
}

/// Class-technique damage: `(10 + class bonus + level*2) * uniform(0.8..1.2)`.
///
/// Canonical policy for the player side of PvE exchanges.
pub fn class_damage(attacker: &Combatant, rng: &mut impl Rng) -> i32 {
    let base = 10 + attacker.class.damage_bonus() + attacker.level as i32 * 2;
    let factor = rng.gen_range(0.8..1.2);
    ((base as f64 * factor) as i32).max(MIN_DAMAGE)
}

/// Adversary damage: `level*5 * damage multiplier * uniform(0.8..1.2)`.
pub fn adversary_damage(adversary: &Combatant, rng: &mut impl Rng) -> i32 {
    let multiplier = adversary
        .adversary_profile()
        .map(|profile| profile.damage_multiplier)
        .unwrap_or(1.0);
    let base = adversary.level as i32 * 5;
    let factor = rng.gen_range(0.8..1.2);
    ((base as f64 * multiplier * factor) as i32).max(MIN_DAMAGE)
}
