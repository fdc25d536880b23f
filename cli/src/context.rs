use solace_core::{CooldownEngine, DefinitionError, EngineConfig, EngineConfigExt};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::sandbox::{HERO_ID, Hero, World};

/// The engine and the world it acts on, locked together so a command sees
/// a consistent view of both.
pub struct Sandbox {
    pub engine: CooldownEngine,
    pub world: World,
}

impl Sandbox {
    pub fn new(engine: CooldownEngine) -> Self {
        let mut hero = Hero::new();
        hero.learn_all(engine.registry());
        Self {
            engine,
            world: World::new(hero),
        }
    }

    /// Swap in a freshly built engine, keeping the world
    pub fn replace_engine(&mut self, engine: CooldownEngine) {
        self.world.hero.learn_all(engine.registry());
        self.engine = engine;
    }

    /// Advance the clock and describe the cooldowns that became ready
    pub fn tick(&mut self, ticks: u64) -> Vec<String> {
        self.world.hero.regenerate(ticks);
        self.engine
            .tick(ticks)
            .into_iter()
            .filter(|ready| ready.actor == HERO_ID)
            .map(|ready| {
                let name = self
                    .engine
                    .registry()
                    .get(&ready.ability_id)
                    .map_or(ready.ability_id.as_str(), |a| a.display_name());
                format!("You can use {name} again.")
            })
            .collect()
    }
}

#[derive(Default)]
pub struct BackgroundTasks {
    pub clock: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.clock.take() {
            handle.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<EngineConfig>>,
    pub sandbox: Arc<RwLock<Sandbox>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new() -> Result<Self, DefinitionError> {
        Self::with_config(EngineConfig::load())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, DefinitionError> {
        let engine = CooldownEngine::from_config(&config)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            sandbox: Arc::new(RwLock::new(Sandbox::new(engine))),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::PotencyResolver;
    use solace_core::{Actor, Combatant, ResourceKind};

    fn sandbox() -> Sandbox {
        let engine = CooldownEngine::with_builtins(2).unwrap();
        Sandbox::new(engine)
    }

    #[test]
    fn hero_knows_builtins() {
        let sandbox = sandbox();
        for id in ["coup", "flurry", "riposte"] {
            assert_eq!(sandbox.world.hero.cooldown_level(id), Some(1));
        }
    }

    #[test]
    fn tick_announces_ready_cooldowns() {
        let mut sandbox = sandbox();
        sandbox.world.spawn("dummy", 19, 100);
        let Sandbox { engine, world } = &mut sandbox;
        let (hero, target) = world.hero_and_target(Some(0));
        let outcome = engine
            .use_ability(
                hero,
                "coup",
                target.map(|t| t as &mut dyn Combatant),
                &mut PotencyResolver,
            )
            .unwrap();
        assert_eq!(outcome.attack.damage, 19);
        assert_eq!(outcome.cooldown_ticks, Some(120));
        assert_eq!(sandbox.world.hero.resource(ResourceKind::Sp), 90);

        assert!(sandbox.tick(119).is_empty());
        assert_eq!(
            sandbox.tick(1),
            vec!["You can use coup de grace again.".to_string()]
        );
    }

    #[tokio::test]
    async fn context_builds_from_config_without_directory() {
        let ctx = CliContext::with_config(EngineConfig::default()).unwrap();
        assert_eq!(ctx.sandbox.read().await.engine.registry().len(), 3);
        assert!(ctx.tasks.lock().await.clock.is_none());
    }
}
