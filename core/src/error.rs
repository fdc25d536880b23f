//! Error types for ability use
//!
//! The `Display` text of every variant is the message shown to the player.

use thiserror::Error;

/// Reasons an ability use is rejected before or during execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityError {
    /// The chosen target does not satisfy the ability's requirements
    #[error("{message}")]
    InvalidTarget { message: String },

    /// The target reports a maximum health of zero or less
    #[error("{name} has no measurable health.")]
    UnmeasurableHealth { name: String },

    #[error("Huh? There is no '{0}' action.")]
    UnknownAbility(String),

    #[error("You do not possess the {0} action.")]
    NotLearned(String),

    #[error("You must be standing and alert to use {0}.")]
    NotAlert(String),

    #[error("{0} is not ready yet.")]
    NotReady(String),

    #[error("Who would you like to use {0} on?")]
    NoTarget(String),

    #[error("{0}")]
    InsufficientResource(String),
}

impl AbilityError {
    pub fn invalid_target(message: impl Into<String>) -> Self {
        AbilityError::InvalidTarget {
            message: message.into(),
        }
    }
}
