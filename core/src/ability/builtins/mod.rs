//! Built-in ability scripts and the abilities shipped with the engine
//!
//! TOML definitions refer to these scripts by name (`script = "coup_de_grace"`).

mod coup_de_grace;
mod flurry;
mod riposte;

use std::sync::Arc;

use phf::phf_map;

use crate::registry::{CommandRegistry, DefinitionError};

use super::AbilityScript;

pub use coup_de_grace::{COUP_DE_GRACE_MESSAGE, COUP_DE_GRACE_THRESHOLD, CoupDeGrace};

/// Scripts a definition file can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinScript {
    Attack,
    CoupDeGrace,
}

impl BuiltinScript {
    pub fn instantiate(&self) -> Arc<dyn AbilityScript> {
        match self {
            BuiltinScript::Attack => standard_attack(),
            BuiltinScript::CoupDeGrace => Arc::new(CoupDeGrace),
        }
    }
}

/// Script lookup table indexed by the name used in definition files
pub static SCRIPTS: phf::Map<&'static str, BuiltinScript> = phf_map! {
    "attack" => BuiltinScript::Attack,
    "coup_de_grace" => BuiltinScript::CoupDeGrace,
};

/// Get a built-in script by name
pub fn script_named(name: &str) -> Option<Arc<dyn AbilityScript>> {
    SCRIPTS.get(name).map(BuiltinScript::instantiate)
}

/// Plain attack: default run, any target
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAttack;

impl AbilityScript for StandardAttack {}

pub fn standard_attack() -> Arc<dyn AbilityScript> {
    Arc::new(StandardAttack)
}

/// Register every built-in ability
pub fn register_all(registry: &mut CommandRegistry) -> Result<(), DefinitionError> {
    coup_de_grace::register(registry)?;
    flurry::register(registry)?;
    riposte::register(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_resolve_by_name() {
        assert!(script_named("attack").is_some());
        assert!(script_named("coup_de_grace").is_some());
        assert!(script_named("fireball").is_none());
    }

    #[test]
    fn register_all_installs_builtins() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry).expect("builtins register once");

        assert_eq!(registry.len(), 3);
        assert!(registry.get("coup").is_some());
        assert!(registry.get("flurry").is_some());
        assert!(registry.get("riposte").is_some());
    }

    #[test]
    fn register_all_twice_is_rejected() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry).expect("first registration");
        assert!(matches!(
            register_all(&mut registry),
            Err(DefinitionError::DuplicateAbility(id)) if id == "coup"
        ));
    }
}
