//! Cooldown engine
//!
//! Runs the full pipeline for a player typing a cooldown command: skill and
//! readiness checks, target validation, resource costs, execution, and
//! cooldown bookkeeping. Starting battles is left to the caller, guided by
//! `UseOutcome::initiates_combat`.

use std::path::Path;

use solace_types::{CooldownSpec, EngineConfig};

use crate::ability::{AttackOutcome, AttackResolver, CooldownContext, builtins};
use crate::cooldowns::{CooldownReady, CooldownTracker, Tick};
use crate::entity::{Actor, Combatant, EntityId};
use crate::error::AbilityError;
use crate::registry::{CommandRegistry, DefinitionError};

/// Result of a successful (not rejected) ability use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseOutcome {
    pub ability_id: String,
    pub display_name: String,
    pub attack: AttackOutcome,
    /// Whether the caller should start a battle between actor and target
    pub initiates_combat: bool,
    /// Length of the cooldown that was started, if any
    pub cooldown_ticks: Option<Tick>,
    pub combo: bool,
}

#[derive(Debug, Clone)]
pub struct CooldownEngine {
    registry: CommandRegistry,
    cooldowns: CooldownTracker,
}

impl CooldownEngine {
    pub fn new(registry: CommandRegistry, gcd_ticks: Tick) -> Self {
        Self {
            registry,
            cooldowns: CooldownTracker::new(gcd_ticks),
        }
    }

    /// Engine with the built-in abilities registered
    pub fn with_builtins(gcd_ticks: Tick) -> Result<Self, DefinitionError> {
        let mut registry = CommandRegistry::new();
        builtins::register_all(&mut registry)?;
        Ok(Self::new(registry, gcd_ticks))
    }

    /// Built-ins plus the custom definitions in the configured directory
    pub fn from_config(config: &EngineConfig) -> Result<Self, DefinitionError> {
        let mut engine = Self::with_builtins(config.gcd_ticks)?;
        if !config.ability_directory.is_empty() {
            engine
                .registry
                .load_dir(Path::new(&config.ability_directory))?;
        }
        Ok(engine)
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    /// Use the ability named by `input` against `target`.
    pub fn use_ability(
        &mut self,
        actor: &mut dyn Actor,
        input: &str,
        target: Option<&mut dyn Combatant>,
        resolver: &mut dyn AttackResolver,
    ) -> Result<UseOutcome, AbilityError> {
        let ability = self
            .registry
            .find(input)
            .ok_or_else(|| AbilityError::UnknownAbility(input.trim().to_string()))?;
        let id = ability.id();
        let actor_id = actor.id();

        // Determine if the actor even has the skill
        let level = actor
            .cooldown_level(id)
            .ok_or_else(|| AbilityError::NotLearned(id.to_string()))?;

        if !actor.play_state().is_ready() {
            return Err(AbilityError::NotAlert(id.to_string()));
        }

        let on_gcd = ability.is_global() && self.cooldowns.is_on_gcd(actor_id);
        if on_gcd || self.cooldowns.is_on_cooldown(actor_id, id) {
            return Err(AbilityError::NotReady(id.to_string()));
        }

        let Some(target) = target else {
            return Err(AbilityError::NoTarget(id.to_string()));
        };
        if target.is_dead() {
            return Err(AbilityError::invalid_target(
                "You cannot attack a target that is already dead!",
            ));
        }
        ability.check_valid_target(&*target)?;

        // Every cost must be payable before any is paid
        if let Some(cost) = ability.costs().iter().find(|c| !c.can_withdraw(&*actor)) {
            return Err(AbilityError::InsufficientResource(cost.insufficient_message()));
        }
        for cost in ability.costs() {
            cost.withdraw(&mut *actor);
        }

        if ability.is_global() {
            self.cooldowns.start_gcd(actor_id);
        }

        let previous = self.cooldowns.combo_action(actor_id).map(str::to_string);
        let (attack, combo) = {
            let mut ctx = CooldownContext::new(ability, level, previous.as_deref(), &mut *resolver);
            let attack = ability.run(&*actor, target, level, &mut ctx);
            (attack, ctx.is_combo())
        };

        let mut cooldown_ticks = None;
        if attack.landed {
            match ability.cooldown() {
                CooldownSpec::Timed { secs } => {
                    let ticks = Tick::from(secs);
                    self.cooldowns.start(actor_id, id, ticks);
                    cooldown_ticks = Some(ticks);
                }
                CooldownSpec::Global => self.cooldowns.set_combo_action(actor_id, id),
            }
        }

        tracing::debug!(
            actor = actor_id,
            ability = id,
            level,
            landed = attack.landed,
            damage = attack.damage,
            combo,
            "Ability used"
        );

        Ok(UseOutcome {
            ability_id: id.to_string(),
            display_name: ability.display_name().to_string(),
            attack,
            initiates_combat: ability.initiates_combat() && attack.landed,
            cooldown_ticks,
            combo,
        })
    }

    /// Advance the game clock, returning the cooldowns that became ready
    pub fn tick(&mut self, ticks: Tick) -> Vec<CooldownReady> {
        let ready = self.cooldowns.advance(ticks);
        for entry in &ready {
            tracing::debug!(actor = entry.actor, ability = %entry.ability_id, "Cooldown ready");
        }
        ready
    }

    /// Running cooldowns of `actor` with their display names
    pub fn cooldowns_for(&self, actor: EntityId) -> Vec<(String, Tick)> {
        self.cooldowns
            .active_for(actor)
            .into_iter()
            .map(|(id, remaining)| {
                let name = self
                    .registry
                    .get(id)
                    .map_or(id, |ability| ability.display_name());
                (name.to_string(), remaining)
            })
            .collect()
    }

    pub fn forget_actor(&mut self, actor: EntityId) {
        self.cooldowns.clear_actor(actor);
    }
}
