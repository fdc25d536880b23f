//! Cooldown tracking
//!
//! Time is counted in game ticks. One tick is one game second; how long a
//! tick lasts in real time is up to whoever drives `CooldownTracker::advance`.
//!
//! # Cooldown Types
//!
//! - **Timed**: an ability-specific cooldown (coup de grace: 120 ticks)
//! - **Global**: a short lockout shared by every global-cooldown ability
//!
//! Successful global-cooldown uses also record the actor's combo action.

mod tracker;


pub use tracker::{CooldownKey, CooldownReady, CooldownTracker, Tick};
