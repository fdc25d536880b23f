//! Target health gates

use crate::entity::Combatant;
use crate::error::AbilityError;

use super::AbilityScript;

/// Accepts only targets whose health fraction is strictly below `below`.
///
/// A fraction equal to the threshold is rejected. Targets without a
/// positive maximum health are rejected with `UnmeasurableHealth`.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthGate {
    below: f64,
    message: String,
}

impl HealthGate {
    pub fn new(below: f64, message: impl Into<String>) -> Self {
        Self {
            below,
            message: message.into(),
        }
    }

    /// Gate with a generated message, e.g. "... less than 35% health."
    pub fn with_default_message(below: f64, display_name: &str) -> Self {
        let message = format!(
            "{} can only be used on targets with less than {}% health.",
            capitalize(display_name),
            (below * 100.0).round() as i64
        );
        Self::new(below, message)
    }

    pub fn below(&self) -> f64 {
        self.below
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check(&self, target: &dyn Combatant) -> Result<(), AbilityError> {
        let fraction = target
            .health_fraction()
            .ok_or_else(|| AbilityError::UnmeasurableHealth {
                name: target.name().to_string(),
            })?;
        if fraction >= self.below {
            return Err(AbilityError::invalid_target(self.message.clone()));
        }
        Ok(())
    }
}

/// A gate on its own is a plain attack restricted to weakened targets.
impl AbilityScript for HealthGate {
    fn check_valid_target(&self, target: &dyn Combatant) -> Result<(), AbilityError> {
        self.check(target)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
