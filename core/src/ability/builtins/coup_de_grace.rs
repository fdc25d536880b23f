//! "Coup de grace": a heavy finishing blow that only lands on targets at
//! less than 20% health.

use std::sync::Arc;

use solace_types::ResourceKind;

use crate::ability::{Ability, AbilityScript, HealthGate};
use crate::cost::ResourceCost;
use crate::entity::Combatant;
use crate::error::AbilityError;
use crate::registry::{CommandRegistry, DefinitionError};

pub const COUP_DE_GRACE_THRESHOLD: f64 = 0.2;

pub const COUP_DE_GRACE_MESSAGE: &str =
    "Coup de grace can only be used on targets with less than 20% health.";

#[derive(Debug, Clone, Copy, Default)]
pub struct CoupDeGrace;

impl AbilityScript for CoupDeGrace {
    fn check_valid_target(&self, target: &dyn Combatant) -> Result<(), AbilityError> {
        HealthGate::new(COUP_DE_GRACE_THRESHOLD, COUP_DE_GRACE_MESSAGE).check(target)
    }
}

pub fn ability() -> Ability {
    Ability::new("coup", "coup de grace")
        .with_cooldown_secs(120)
        .initiating_combat(true)
        .with_base_potency(500)
        .with_cost(ResourceCost::percent(ResourceKind::Sp, 10))
        .with_script(Arc::new(CoupDeGrace))
}

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), DefinitionError> {
    registry.register_cooldown(ability())
}
