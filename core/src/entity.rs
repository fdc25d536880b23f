//! Entities an ability acts on
//!
//! The engine never owns players or mobiles. It works through these traits,
//! which the game world implements for its own types.

pub use solace_types::ResourceKind;

/// Runtime identifier of a player or mobile
pub type EntityId = u64;

/// Anything that has health and can be attacked.
pub trait Combatant {
    fn id(&self) -> EntityId;

    fn name(&self) -> &str;

    fn current_health(&self) -> i32;

    fn max_health(&self) -> i32;

    /// Subtract `damage` from current health, returning the damage dealt
    fn apply_damage(&mut self, damage: i32) -> i32;

    fn is_dead(&self) -> bool {
        self.current_health() <= 0
    }

    /// Current health divided by maximum health.
    ///
    /// Returns `None` when maximum health is zero or negative.
    fn health_fraction(&self) -> Option<f64> {
        let max = self.max_health();
        if max <= 0 {
            return None;
        }
        Some(f64::from(self.current_health()) / f64::from(max))
    }
}

/// What a player or mobile is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Standing,
    Fighting,
    Sitting,
    Resting,
    Sleeping,
}

impl PlayState {
    /// Standing or fighting: the only states from which cooldowns can be used
    pub fn is_ready(&self) -> bool {
        matches!(self, PlayState::Standing | PlayState::Fighting)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayState::Standing => "standing",
            PlayState::Fighting => "fighting",
            PlayState::Sitting => "sitting",
            PlayState::Resting => "resting",
            PlayState::Sleeping => "sleeping",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "standing" | "stand" => Some(PlayState::Standing),
            "fighting" | "fight" => Some(PlayState::Fighting),
            "sitting" | "sit" => Some(PlayState::Sitting),
            "resting" | "rest" => Some(PlayState::Resting),
            "sleeping" | "sleep" => Some(PlayState::Sleeping),
            _ => None,
        }
    }
}

/// An entity that uses abilities.
pub trait Actor: Combatant {
    fn play_state(&self) -> PlayState;

    fn resource(&self, kind: ResourceKind) -> i32;

    fn max_resource(&self, kind: ResourceKind) -> i32;

    fn set_resource(&mut self, kind: ResourceKind, value: i32);

    /// Skill level for a cooldown ability, `None` if it was never learned
    fn cooldown_level(&self, ability_id: &str) -> Option<u32>;

    fn has_passive(&self, _name: &str) -> bool {
        false
    }
}

/// Colour band for displaying a target's remaining health in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Full,
    High,
    Moderate,
    Wounded,
    Low,
    Critical,
}

impl HealthBand {
    pub fn from_percent(percent: i32) -> Self {
        match percent {
            p if p > 85 => HealthBand::Full,
            p if p > 70 => HealthBand::High,
            p if p > 55 => HealthBand::Moderate,
            p if p > 40 => HealthBand::Wounded,
            p if p > 25 => HealthBand::Low,
            _ => HealthBand::Critical,
        }
    }

    /// Colour tag understood by the terminal renderer
    pub fn color_tag(&self) -> &'static str {
        match self {
            HealthBand::Full => "{G}",
            HealthBand::High => "{g}",
            HealthBand::Moderate => "{y}",
            HealthBand::Wounded => "{Y}",
            HealthBand::Low => "{r}",
            HealthBand::Critical => "{R}",
        }
    }
}

/// Remaining health as a whole percentage, `None` for unmeasurable targets
pub fn health_percent(target: &dyn Combatant) -> Option<i32> {
    target
        .health_fraction()
        .map(|fraction| (fraction * 100.0) as i32)
}

/// Health percentage wrapped in its colour tag, e.g. `{r}31%{x}`
pub fn colored_health(target: &dyn Combatant) -> String {
    match health_percent(target) {
        Some(percent) => format!(
            "{}{}%{{x}}",
            HealthBand::from_percent(percent).color_tag(),
            percent
        ),
        None => String::from("--"),
    }
}
