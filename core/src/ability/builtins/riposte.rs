//! "Riposte": 150 potency, or 350 when it follows a slash.

use solace_types::ResourceKind;

use crate::ability::Ability;
use crate::cost::ResourceCost;
use crate::registry::{CommandRegistry, DefinitionError};

pub fn ability() -> Ability {
    Ability::new("riposte", "riposte")
        .initiating_combat(true)
        .with_base_potency(150)
        .with_combo("slash", 350)
        .with_cost(ResourceCost::percent(ResourceKind::Sp, 6))
}

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), DefinitionError> {
    registry.register_cooldown(ability())
}
