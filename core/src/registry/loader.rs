//! TOML loading of ability definitions

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use solace_types::{AbilityDefinition, AbilityFile, CostMode};

use crate::ability::builtins;
use crate::ability::{Ability, HealthGate};
use crate::cost::ResourceCost;

use super::DefinitionError;

/// Parse every ability in a single TOML file
pub fn load_definitions_from_file(path: &Path) -> Result<Vec<AbilityDefinition>, DefinitionError> {
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file: AbilityFile = toml::from_str(&content).map_err(|source| DefinitionError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.abilities)
}

/// Recursively load every `*.toml` file under `dir`, in path order.
///
/// Files that cannot be read or parsed are logged and skipped.
pub fn load_definitions_from_dir(
    dir: &Path,
) -> Result<Vec<(PathBuf, AbilityDefinition)>, DefinitionError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    collect_toml_files(dir, &mut files)?;
    files.sort();

    let mut definitions = Vec::new();
    for path in files {
        match load_definitions_from_file(&path) {
            Ok(file_definitions) => {
                definitions.extend(file_definitions.into_iter().map(|d| (path.clone(), d)));
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Skipping ability file");
            }
        }
    }
    Ok(definitions)
}

fn collect_toml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DefinitionError> {
    let entries = fs::read_dir(dir).map_err(|source| DefinitionError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_toml_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(())
}

/// Build a runtime ability from its definition.
///
/// `path` is only used for error reporting.
pub fn build_ability(definition: &AbilityDefinition, path: &Path) -> Result<Ability, DefinitionError> {
    let invalid = |reason: String| DefinitionError::InvalidDefinition {
        path: path.to_path_buf(),
        reason,
    };

    if definition.id.trim().is_empty() {
        return Err(invalid("ability id is empty".to_string()));
    }

    let mut ability = Ability::new(definition.id.clone(), definition.display_name())
        .with_cooldown(definition.cooldown)
        .initiating_combat(definition.initiates_combat)
        .with_base_potency(definition.base_potency)
        .with_cast_time(definition.cast_time_secs);

    match (&definition.combos_with, definition.combo_potency) {
        (Some(with), Some(potency)) => ability = ability.with_combo(with.clone(), potency),
        (None, None) => {}
        _ => {
            return Err(invalid(format!(
                "{}: combos_with and combo_potency must be set together",
                definition.id
            )));
        }
    }

    for cost in &definition.costs {
        if cost.mode == CostMode::Percent && cost.amount > 100 {
            return Err(invalid(format!(
                "{}: {} cost of {}% exceeds 100%",
                definition.id,
                cost.resource.label(),
                cost.amount
            )));
        }
        ability = ability.with_cost(ResourceCost::from(cost));
    }

    match (&definition.script, &definition.target_health) {
        (Some(_), Some(_)) => {
            return Err(invalid(format!(
                "{}: script and target_health cannot both be set",
                definition.id
            )));
        }
        (Some(name), None) => {
            let script = builtins::script_named(name).ok_or_else(|| DefinitionError::UnknownScript {
                path: path.to_path_buf(),
                script: name.clone(),
            })?;
            ability = ability.with_script(script);
        }
        (None, Some(gate)) => {
            if !(gate.below > 0.0 && gate.below <= 1.0) {
                return Err(invalid(format!(
                    "{}: target_health.below must be within (0, 1], got {}",
                    definition.id, gate.below
                )));
            }
            let gate = match &gate.message {
                Some(message) => HealthGate::new(gate.below, message.clone()),
                None => HealthGate::with_default_message(gate.below, definition.display_name()),
            };
            ability = ability.with_script(Arc::new(gate));
        }
        (None, None) => {}
    }

    Ok(ability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::builtins::COUP_DE_GRACE_MESSAGE;
    use crate::error::AbilityError;
    use crate::registry::CommandRegistry;
    use crate::test_support::Mob;
    use solace_types::{CooldownSpec, ResourceKind};

    const ONE_HANDED: &str = r#"
[[ability]]
id = "coup"
display_name = "coup de grace"
cooldown = { type = "timed", secs = 120 }
initiates_combat = true
base_potency = 500
script = "coup_de_grace"

[[ability.cost]]
resource = "sp"
amount = 10

[[ability]]
id = "slash"
base_potency = 100

[[ability.cost]]
resource = "sp"
mode = "flat"
amount = 4

[[ability]]
id = "execute"
cooldown = { type = "timed", secs = 30 }
base_potency = 300
target_health = { below = 0.35 }
"#;

    fn parse(toml_str: &str) -> Vec<AbilityDefinition> {
        let file: AbilityFile = toml::from_str(toml_str).expect("Failed to parse TOML");
        file.abilities
    }

    #[test]
    fn test_parse_ability_file() {
        let definitions = parse(ONE_HANDED);
        assert_eq!(definitions.len(), 3);

        let coup = &definitions[0];
        assert_eq!(coup.id, "coup");
        assert_eq!(coup.cooldown, CooldownSpec::Timed { secs: 120 });
        assert_eq!(coup.costs[0].resource, ResourceKind::Sp);
        assert_eq!(coup.costs[0].mode, CostMode::Percent);
        assert_eq!(coup.script.as_deref(), Some("coup_de_grace"));

        let slash = &definitions[1];
        assert_eq!(slash.cooldown, CooldownSpec::Global);
        assert_eq!(slash.display_name(), "slash");
        assert_eq!(slash.costs[0].mode, CostMode::Flat);
        assert!(slash.enabled);
    }

    #[test]
    fn test_build_scripted_ability() {
        let definitions = parse(ONE_HANDED);
        let coup = build_ability(&definitions[0], Path::new("one_handed.toml")).unwrap();
        assert_eq!(coup.cooldown_secs(), Some(120));
        assert_eq!(
            coup.check_valid_target(&Mob::new(1, "orc", 20, 100)),
            Err(AbilityError::invalid_target(COUP_DE_GRACE_MESSAGE))
        );
        assert!(coup.check_valid_target(&Mob::new(1, "orc", 19, 100)).is_ok());
    }

    #[test]
    fn test_build_health_gated_ability() {
        let definitions = parse(ONE_HANDED);
        let execute = build_ability(&definitions[2], Path::new("one_handed.toml")).unwrap();
        let err = execute
            .check_valid_target(&Mob::new(1, "orc", 35, 100))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Execute can only be used on targets with less than 35% health."
        );
        assert!(execute.check_valid_target(&Mob::new(1, "orc", 34, 100)).is_ok());
    }

    #[test]
    fn test_unknown_script_is_rejected() {
        let mut definition = parse(ONE_HANDED).remove(0);
        definition.script = Some("fireball".to_string());
        assert!(matches!(
            build_ability(&definition, Path::new("x.toml")),
            Err(DefinitionError::UnknownScript { script, .. }) if script == "fireball"
        ));
    }

    #[test]
    fn test_invalid_definitions_are_rejected() {
        let base = parse(ONE_HANDED);

        let mut empty_id = base[1].clone();
        empty_id.id = "  ".to_string();
        let mut bad_gate = base[2].clone();
        if let Some(gate) = bad_gate.target_health.as_mut() {
            gate.below = 1.5;
        }
        let mut half_combo = base[1].clone();
        half_combo.combo_potency = Some(200);
        let mut greedy = base[0].clone();
        greedy.costs[0].amount = 150;
        let mut both = base[0].clone();
        both.target_health = base[2].target_health.clone();

        for definition in [empty_id, bad_gate, half_combo, greedy, both] {
            assert!(matches!(
                build_ability(&definition, Path::new("x.toml")),
                Err(DefinitionError::InvalidDefinition { .. })
            ));
        }
    }

    #[test]
    fn test_load_dir_overrides_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("one-handed");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("cooldowns.toml"), ONE_HANDED).unwrap();
        fs::write(dir.path().join("broken.toml"), "[[ability]\nid = ").unwrap();
        fs::write(dir.path().join("notes.txt"), "not toml").unwrap();
        fs::write(
            dir.path().join("disabled.toml"),
            "[[ability]]\nid = \"sleepy\"\nenabled = false\n",
        )
        .unwrap();

        let mut registry = CommandRegistry::new();
        builtins::register_all(&mut registry).unwrap();
        let loaded = registry.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(registry.len(), 5);
        assert!(registry.get("sleepy").is_none());
        assert!(registry.get("execute").is_some());
        assert_eq!(registry.get("slash").unwrap().costs()[0].amount, 4);
    }

    #[test]
    fn test_load_dir_skips_definitions_that_fail_to_build() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.toml"),
            "[[ability]]\nid = \"coup\"\ndisplay_name = \"weak coup\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.toml"),
            "[[ability]]\nid = \"blaze\"\nscript = \"fireball\"\n\n[[ability]]\nid = \"jab\"\n",
        )
        .unwrap();

        let mut registry = CommandRegistry::new();
        builtins::register_all(&mut registry).unwrap();
        let loaded = registry.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert!(registry.get("blaze").is_none());
        assert!(registry.get("jab").is_some());
        assert_eq!(registry.get("coup").unwrap().display_name(), "weak coup");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_bundled_definitions_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/abilities");
        let mut registry = CommandRegistry::new();
        builtins::register_all(&mut registry).unwrap();

        assert_eq!(registry.load_dir(&dir).unwrap(), 4);
        assert_eq!(registry.len(), 6);
        assert!(registry.get("lunge").is_none());
        assert_eq!(registry.find("arcane bolt").unwrap().cast_time_secs(), 2);
        assert_eq!(registry.get("riposte").unwrap().combo().unwrap().potency, 350);
    }

    #[test]
    fn test_missing_dir_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let definitions = load_definitions_from_dir(&dir.path().join("absent")).unwrap();
        assert!(definitions.is_empty());
    }
}
