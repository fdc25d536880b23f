//! Cooldown abilities
//!
//! This module provides:
//! - **Descriptor**: `Ability`, the immutable record the registry hands out
//! - **Scripts**: `AbilityScript`, the execution and target-validation behavior
//! - **Context**: `CooldownContext`, the attack capability handed to scripts
//! - **Gates**: `HealthGate`, the reusable "finish them off" target rule
//!
//! A descriptor is built once at load time (from a built-in or a TOML
//! definition) and never mutated afterwards.

pub mod builtins;
mod context;
mod gate;

use std::fmt;
use std::sync::Arc;

use solace_types::CooldownSpec;

use crate::cost::ResourceCost;
use crate::entity::{Actor, Combatant};
use crate::error::AbilityError;

pub use context::{Attack, AttackOutcome, AttackResolver, CooldownContext};
pub use gate::HealthGate;

/// Behavior of an ability.
///
/// Both methods have defaults: a plain attack that accepts any target.
pub trait AbilityScript: Send + Sync + fmt::Debug {
    /// Execute the ability against `target`.
    fn run(
        &self,
        actor: &dyn Actor,
        target: &mut dyn Combatant,
        _level: u32,
        cooldown: &mut CooldownContext<'_>,
    ) -> AttackOutcome {
        cooldown.execute_attack(actor, target)
    }

    /// Decide whether `target` may be chosen for this ability.
    fn check_valid_target(&self, _target: &dyn Combatant) -> Result<(), AbilityError> {
        Ok(())
    }
}

/// Bonus potency granted when the actor's previous global-cooldown action
/// was `with`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combo {
    pub with: String,
    pub potency: u32,
}

/// Descriptor of a cooldown ability
#[derive(Debug, Clone)]
pub struct Ability {
    id: String,
    display_name: String,
    cooldown: CooldownSpec,
    initiates_combat: bool,
    base_potency: u32,
    combo: Option<Combo>,
    cast_time_secs: u32,
    costs: Vec<ResourceCost>,
    script: Arc<dyn AbilityScript>,
}

impl Ability {
    /// A global-cooldown attack with no cost and zero potency.
    /// Use the `with_*` builders to configure it.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            cooldown: CooldownSpec::Global,
            initiates_combat: false,
            base_potency: 0,
            combo: None,
            cast_time_secs: 0,
            costs: Vec::new(),
            script: builtins::standard_attack(),
        }
    }

    pub fn with_cooldown(mut self, cooldown: CooldownSpec) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_cooldown_secs(self, secs: u32) -> Self {
        self.with_cooldown(CooldownSpec::Timed { secs })
    }

    pub fn initiating_combat(mut self, initiates: bool) -> Self {
        self.initiates_combat = initiates;
        self
    }

    pub fn with_base_potency(mut self, potency: u32) -> Self {
        self.base_potency = potency;
        self
    }

    pub fn with_combo(mut self, with: impl Into<String>, potency: u32) -> Self {
        self.combo = Some(Combo {
            with: with.into(),
            potency,
        });
        self
    }

    pub fn with_cast_time(mut self, secs: u32) -> Self {
        self.cast_time_secs = secs;
        self
    }

    pub fn with_cost(mut self, cost: ResourceCost) -> Self {
        self.costs.push(cost);
        self
    }

    pub fn with_script(mut self, script: Arc<dyn AbilityScript>) -> Self {
        self.script = script;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn cooldown(&self) -> CooldownSpec {
        self.cooldown
    }

    pub fn is_global(&self) -> bool {
        self.cooldown == CooldownSpec::Global
    }

    /// Own cooldown length in seconds, `None` for global-cooldown abilities
    pub fn cooldown_secs(&self) -> Option<u32> {
        match self.cooldown {
            CooldownSpec::Global => None,
            CooldownSpec::Timed { secs } => Some(secs),
        }
    }

    pub fn initiates_combat(&self) -> bool {
        self.initiates_combat
    }

    pub fn base_potency(&self) -> u32 {
        self.base_potency
    }

    pub fn combo(&self) -> Option<&Combo> {
        self.combo.as_ref()
    }

    pub fn cast_time_secs(&self) -> u32 {
        self.cast_time_secs
    }

    pub fn costs(&self) -> &[ResourceCost] {
        &self.costs
    }

    pub fn script(&self) -> &Arc<dyn AbilityScript> {
        &self.script
    }

    /// Potency of the next attack given the actor's last combo action
    pub fn potency_after(&self, previous_action: Option<&str>) -> (u32, bool) {
        match (&self.combo, previous_action) {
            (Some(combo), Some(previous)) if combo.with == previous => (combo.potency, true),
            _ => (self.base_potency, false),
        }
    }

    pub fn check_valid_target(&self, target: &dyn Combatant) -> Result<(), AbilityError> {
        self.script.check_valid_target(target)
    }

    pub fn run(
        &self,
        actor: &dyn Actor,
        target: &mut dyn Combatant,
        level: u32,
        cooldown: &mut CooldownContext<'_>,
    ) -> AttackOutcome {
        self.script.run(actor, target, level, cooldown)
    }
}
