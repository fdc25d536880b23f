//! Cooldown command registry
//!
//! Holds every ability available to the game. The registry is an ordinary
//! value: build one, register built-ins, load custom definitions, and pass
//! it to the engine.

mod error;
mod loader;

use std::path::Path;

use hashbrown::HashMap;

use crate::ability::Ability;

pub use error::DefinitionError;
pub use loader::{build_ability, load_definitions_from_dir, load_definitions_from_file};

#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    cooldowns: HashMap<String, Ability>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new cooldown ability under its id.
    pub fn register_cooldown(&mut self, ability: Ability) -> Result<(), DefinitionError> {
        if self.cooldowns.contains_key(ability.id()) {
            return Err(DefinitionError::DuplicateAbility(ability.id().to_string()));
        }
        tracing::debug!(ability = ability.id(), "Registered cooldown");
        self.cooldowns.insert(ability.id().to_string(), ability);
        Ok(())
    }

    /// Register or replace an ability, returning the one it replaced
    pub fn override_cooldown(&mut self, ability: Ability) -> Option<Ability> {
        let previous = self.cooldowns.insert(ability.id().to_string(), ability);
        if let Some(old) = &previous {
            tracing::debug!(ability = old.id(), "Replaced cooldown definition");
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<&Ability> {
        self.cooldowns.get(id)
    }

    /// Resolve what a player typed: exact id, then a unique id prefix,
    /// then display name. Case-insensitive.
    pub fn find(&self, input: &str) -> Option<&Ability> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }
        if let Some(ability) = self.cooldowns.get(input.as_str()) {
            return Some(ability);
        }
        if let Some(ability) = self
            .cooldowns
            .values()
            .find(|a| a.id().to_lowercase() == input)
        {
            return Some(ability);
        }

        let mut prefixed = self
            .cooldowns
            .values()
            .filter(|a| a.id().to_lowercase().starts_with(&input));
        if let (Some(only), None) = (prefixed.next(), prefixed.next()) {
            return Some(only);
        }

        self.cooldowns
            .values()
            .find(|a| a.display_name().to_lowercase() == input)
    }

    pub fn len(&self) -> usize {
        self.cooldowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cooldowns.is_empty()
    }

    /// All abilities sorted by id
    pub fn abilities(&self) -> Vec<&Ability> {
        let mut abilities: Vec<&Ability> = self.cooldowns.values().collect();
        abilities.sort_by(|a, b| a.id().cmp(b.id()));
        abilities
    }

    /// Load every definition under `dir`, replacing abilities with the same id.
    ///
    /// Returns the number of abilities loaded. A missing directory loads
    /// nothing. Files that fail to parse and definitions that fail to build
    /// are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, DefinitionError> {
        let definitions = load_definitions_from_dir(dir)?;
        let mut loaded = 0;
        for (path, definition) in definitions {
            if !definition.enabled {
                tracing::debug!(ability = %definition.id, "Skipping disabled definition");
                continue;
            }
            match build_ability(&definition, &path) {
                Ok(ability) => {
                    self.override_cooldown(ability);
                    loaded += 1;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping invalid ability definition");
                }
            }
        }
        tracing::info!(count = loaded, dir = %dir.display(), "Loaded ability definitions");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::builtins;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        builtins::register_all(&mut registry).expect("builtins");
        registry
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry();
        let err = registry
            .register_cooldown(Ability::new("coup", "another coup"))
            .unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateAbility(id) if id == "coup"));
        assert_eq!(registry.get("coup").unwrap().display_name(), "coup de grace");
    }

    #[test]
    fn override_replaces_existing() {
        let mut registry = registry();
        let old = registry.override_cooldown(Ability::new("coup", "coup v2"));
        assert_eq!(old.unwrap().display_name(), "coup de grace");
        assert_eq!(registry.get("coup").unwrap().display_name(), "coup v2");
    }

    #[test]
    fn find_matches_id_prefix_and_display_name() {
        let registry = registry();
        assert_eq!(registry.find("coup").unwrap().id(), "coup");
        assert_eq!(registry.find("COU").unwrap().id(), "coup");
        assert_eq!(registry.find("fl").unwrap().id(), "flurry");
        assert_eq!(registry.find("Coup de Grace").unwrap().id(), "coup");
        assert!(registry.find("zzz").is_none());
        assert!(registry.find("").is_none());
    }

    #[test]
    fn ambiguous_prefix_does_not_match() {
        let mut registry = CommandRegistry::new();
        registry.register_cooldown(Ability::new("slash", "slash")).unwrap();
        registry.register_cooldown(Ability::new("slam", "slam")).unwrap();
        assert!(registry.find("sl").is_none());
        assert_eq!(registry.find("sla").map(|a| a.id()), None);
        assert_eq!(registry.find("slas").unwrap().id(), "slash");
    }

    #[test]
    fn exact_id_match_ignores_case() {
        let mut registry = CommandRegistry::new();
        registry
            .register_cooldown(Ability::new("Execute", "execute"))
            .unwrap();
        registry
            .register_cooldown(Ability::new("executioner", "executioner"))
            .unwrap();
        assert_eq!(registry.find("execute").unwrap().id(), "Execute");
        assert_eq!(registry.find("EXECUTE").unwrap().id(), "Execute");
        assert_eq!(registry.find("executioner").unwrap().id(), "executioner");
    }

    #[test]
    fn abilities_are_sorted() {
        let registry = registry();
        let ids: Vec<&str> = registry.abilities().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["coup", "flurry", "riposte"]);
    }
}
