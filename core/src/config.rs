//! Engine configuration
//!
//! Re-exports `EngineConfig` from solace-types and adds platform-specific
//! defaults and persistence.

use std::time::Duration;

pub use solace_types::EngineConfig;

const APP_NAME: &str = "solace";
const CONFIG_NAME: &str = "config";

fn default_ability_directory() -> String {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME).join("abilities"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

/// Extension trait for EngineConfig persistence
pub trait EngineConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), confy::ConfyError>;
    fn tick_duration(&self) -> Duration;
}

impl EngineConfigExt for EngineConfig {
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to load configuration, using defaults");
            Self::load_with_defaults()
        })
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        EngineConfig::with_ability_directory(default_ability_directory())
    }

    fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_config_dir() {
        let config = EngineConfig::load_with_defaults();
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.gcd_ticks, 2);
        assert!(config.clock_enabled);
        if dirs::config_dir().is_some() {
            assert!(config.ability_directory.ends_with("abilities"));
        }
    }

    #[test]
    fn tick_duration_never_zero() {
        let mut config = EngineConfig::default();
        assert_eq!(config.tick_duration(), Duration::from_secs(1));
        config.tick_ms = 0;
        assert_eq!(config.tick_duration(), Duration::from_millis(1));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: EngineConfig = toml::from_str("tick_ms = 250").expect("parse");
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.gcd_ticks, 2);
        assert!(config.clock_enabled);
        assert!(config.ability_directory.is_empty());
    }
}
