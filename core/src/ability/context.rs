//! Attack capability handed to ability scripts

use crate::entity::{Actor, Combatant};

use super::Ability;

/// Result of resolving an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Whether the attack connected. Only landed attacks start cooldowns.
    pub landed: bool,
    pub damage: i32,
}

impl AttackOutcome {
    pub fn landed(damage: i32) -> Self {
        Self {
            landed: true,
            damage,
        }
    }

    pub fn missed() -> Self {
        Self {
            landed: false,
            damage: 0,
        }
    }
}

/// Everything the damage formula needs to know about an ability use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub ability_id: String,
    /// Base or combo potency, whichever applies
    pub potency: u32,
    pub level: u32,
    pub combo: bool,
}

/// Turns an `Attack` into damage. Implemented by the surrounding game.
pub trait AttackResolver {
    fn resolve_attack(
        &mut self,
        attack: &Attack,
        actor: &dyn Actor,
        target: &mut dyn Combatant,
    ) -> AttackOutcome;
}

/// Per-use context passed to `AbilityScript::run`.
pub struct CooldownContext<'a> {
    ability: &'a Ability,
    level: u32,
    potency: u32,
    combo: bool,
    resolver: &'a mut dyn AttackResolver,
}

impl<'a> CooldownContext<'a> {
    /// `previous_action` is the actor's last global-cooldown ability, used
    /// to decide whether the combo potency applies.
    pub fn new(
        ability: &'a Ability,
        level: u32,
        previous_action: Option<&str>,
        resolver: &'a mut dyn AttackResolver,
    ) -> Self {
        let (potency, combo) = ability.potency_after(previous_action);
        Self {
            ability,
            level,
            potency,
            combo,
            resolver,
        }
    }

    pub fn ability(&self) -> &Ability {
        self.ability
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn potency(&self) -> u32 {
        self.potency
    }

    pub fn is_combo(&self) -> bool {
        self.combo
    }

    /// Attack `target` with this ability's potency.
    ///
    /// Returns the resolver's outcome unchanged.
    pub fn execute_attack(&mut self, actor: &dyn Actor, target: &mut dyn Combatant) -> AttackOutcome {
        let attack = Attack {
            ability_id: self.ability.id().to_string(),
            potency: self.potency,
            level: self.level,
            combo: self.combo,
        };
        self.resolver.resolve_attack(&attack, actor, target)
    }
}
