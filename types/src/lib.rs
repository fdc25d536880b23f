//! Shared definition and configuration types for Solace
//!
//! This crate contains the serializable shapes of ability definitions (as
//! stored in the game's TOML data files) and of the engine configuration.
//! Runtime behavior lives in solace-core.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// A player resource pool that abilities can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Hit points
    Hp,
    /// Magic points
    Mp,
    /// Stamina points
    Sp,
}

impl ResourceKind {
    /// Short lowercase label ("hp", "mp", "sp")
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Hp => "hp",
            ResourceKind::Mp => "mp",
            ResourceKind::Sp => "sp",
        }
    }
}

/// How a cost amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Percentage of the actor's maximum for the resource
    #[default]
    Percent,
    /// Absolute amount
    Flat,
}

/// A single resource cost entry of an ability definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCostDefinition {
    pub resource: ResourceKind,
    #[serde(default)]
    pub mode: CostMode,
    pub amount: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ability Definitions
// ─────────────────────────────────────────────────────────────────────────────

/// How long an ability stays unavailable after a successful use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CooldownSpec {
    /// Shares the actor's global cooldown
    #[default]
    Global,
    /// Own cooldown of the given number of seconds
    Timed { secs: u32 },
}

/// Target health gate: the target's health fraction must be strictly below
/// `below` for the ability to be usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthGateDefinition {
    pub below: f64,
    /// Message shown when the gate rejects a target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Definition of a cooldown ability (loaded from config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Unique identifier, also the command players type (e.g., "coup")
    pub id: String,

    /// Human readable name (defaults to the id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub cooldown: CooldownSpec,

    /// Whether a successful use starts a battle with the target
    #[serde(default)]
    pub initiates_combat: bool,

    /// Damage scaling unit handed to the attack resolver
    #[serde(default)]
    pub base_potency: u32,

    /// Potency used instead of `base_potency` when the combo is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_potency: Option<u32>,

    /// Ability id that, used immediately before, activates the combo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combos_with: Option<String>,

    #[serde(default)]
    pub cast_time_secs: u32,

    #[serde(default, rename = "cost")]
    pub costs: Vec<ResourceCostDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_health: Option<HealthGateDefinition>,

    /// Name of a built-in script providing the ability's behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl AbilityDefinition {
    /// Name shown to players, falling back to the id
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// Root of an ability definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityFile {
    #[serde(default, rename = "ability")]
    pub abilities: Vec<AbilityDefinition>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Note: Persistence methods (load/save) are provided by solace-core via the
/// `EngineConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory scanned for custom ability definition files
    #[serde(default)]
    pub ability_directory: String,

    /// Real time length of one game tick in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Length of the global cooldown in ticks
    #[serde(default = "default_gcd_ticks")]
    pub gcd_ticks: u64,

    /// Run the background game clock
    #[serde(default = "default_true")]
    pub clock_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_ability_directory(String::new())
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with the specified ability directory.
    /// Other fields use their default values.
    pub fn with_ability_directory(ability_directory: String) -> Self {
        Self {
            ability_directory,
            tick_ms: default_tick_ms(),
            gcd_ticks: default_gcd_ticks(),
            clock_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_gcd_ticks() -> u64 {
    2
}
