//! "Flurry of blows": a quick global-cooldown strike.

use solace_types::ResourceKind;

use crate::ability::Ability;
use crate::cost::ResourceCost;
use crate::registry::{CommandRegistry, DefinitionError};

pub fn ability() -> Ability {
    Ability::new("flurry", "flurry of blows")
        .initiating_combat(true)
        .with_base_potency(150)
        .with_cost(ResourceCost::percent(ResourceKind::Sp, 2))
}

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), DefinitionError> {
    registry.register_cooldown(ability())
}
