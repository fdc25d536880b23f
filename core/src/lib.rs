pub mod ability;
pub mod config;
pub mod cooldowns;
pub mod cost;
pub mod engine;
pub mod entity;
pub mod error;
pub mod registry;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use ability::{
    Ability, AbilityScript, Attack, AttackOutcome, AttackResolver, Combo, CooldownContext,
    HealthGate,
};
pub use config::{EngineConfig, EngineConfigExt};
pub use cooldowns::{CooldownReady, CooldownTracker, Tick};
pub use cost::ResourceCost;
pub use engine::{CooldownEngine, UseOutcome};
pub use entity::{
    Actor, Combatant, EntityId, HealthBand, PlayState, ResourceKind, colored_health,
    health_percent,
};
pub use error::AbilityError;
pub use registry::{CommandRegistry, DefinitionError};
