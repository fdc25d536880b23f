use solace_core::cost::METAMAGICAL;
use solace_core::{
    Actor, Combatant, CooldownEngine, EngineConfig, EngineConfigExt, PlayState, ResourceKind,
    colored_health,
};
use solace_types::CostMode;
use std::io::Write;

use crate::CliContext;
use crate::clock;
use crate::context::Sandbox;
use crate::sandbox::{PotencyResolver, render_colors};

fn say(text: &str) {
    println!("{}", render_colors(text));
}

pub async fn list_abilities(ctx: &CliContext) {
    let sandbox = ctx.sandbox.read().await;
    let hero = &sandbox.world.hero;

    for ability in sandbox.engine.registry().abilities() {
        let cooldown = match ability.cooldown_secs() {
            Some(secs) => format!("{secs}s"),
            None => "global".to_string(),
        };
        let costs: Vec<String> = ability
            .costs()
            .iter()
            .map(|cost| match cost.mode {
                CostMode::Percent => format!("{}% {}", cost.amount, cost.resource.label()),
                CostMode::Flat => format!("{} {}", cost.amount, cost.resource.label()),
            })
            .collect();
        let level = hero
            .cooldown_level(ability.id())
            .map_or("-".to_string(), |l| l.to_string());

        println!(
            "{:<10} {:<18} cd {:<7} potency {:<4} cost [{}] level {}",
            ability.id(),
            ability.display_name(),
            cooldown,
            ability.base_potency(),
            costs.join(", "),
            level
        );
    }
}

pub async fn use_ability(ctx: &CliContext, input: &str, target: Option<&str>) {
    let mut guard = ctx.sandbox.write().await;
    let Sandbox { engine, world } = &mut *guard;

    let index = match target {
        Some(name) => match world.find_target(name) {
            Some(index) => Some(index),
            None => {
                println!("They aren't here.");
                return;
            }
        },
        None => None,
    };

    let (hero, dummy) = world.hero_and_target(index);
    let result = engine.use_ability(
        hero,
        input,
        dummy.map(|d| d as &mut dyn Combatant),
        &mut PotencyResolver,
    );

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            say(&err.to_string());
            return;
        }
    };

    let Some(target) = index.and_then(|i| world.target(i)) else {
        return;
    };
    if outcome.attack.landed {
        let combo = if outcome.combo { " (combo)" } else { "" };
        say(&format!(
            "Your {} hits {} for {} damage{combo}. [{}]",
            outcome.display_name,
            target.name(),
            outcome.attack.damage,
            colored_health(target)
        ));
    } else {
        say(&format!(
            "Your {} misses {}.",
            outcome.display_name,
            target.name()
        ));
    }
    if outcome.initiates_combat {
        println!("You are now fighting {}!", target.name());
        world.hero.state = PlayState::Fighting;
    }
    if let Some(ticks) = outcome.cooldown_ticks {
        println!("{} will be ready in {ticks} ticks.", outcome.display_name);
    }
}

pub async fn spawn(ctx: &CliContext, name: &str, hp: i32, max_hp: Option<i32>) {
    let max_hp = max_hp.unwrap_or(hp);
    let mut sandbox = ctx.sandbox.write().await;
    let id = sandbox.world.spawn(name, hp, max_hp);
    tracing::debug!(id, name, hp, max_hp, "Spawned target");
    println!("{name} appears ({hp}/{max_hp}).");
}

pub async fn list_targets(ctx: &CliContext) {
    let sandbox = ctx.sandbox.read().await;
    let targets = sandbox.world.targets();
    if targets.is_empty() {
        println!("Nobody is here. Try `spawn -n dummy --hp 100`.");
        return;
    }
    for target in targets {
        let state = if target.is_dead() { " (dead)" } else { "" };
        say(&format!(
            "{:<16} {:>5}/{:<5} {}{state}",
            target.name(),
            target.current_health(),
            target.max_health(),
            colored_health(target)
        ));
    }
}

pub async fn show_status(ctx: &CliContext) {
    let sandbox = ctx.sandbox.read().await;
    let hero = &sandbox.world.hero;

    println!("You are {}.", hero.play_state().label());
    for kind in [ResourceKind::Hp, ResourceKind::Mp, ResourceKind::Sp] {
        println!(
            "  {}: {}/{}",
            kind.label(),
            hero.resource(kind),
            hero.max_resource(kind)
        );
    }
    if hero.has_passive(METAMAGICAL) {
        println!("  passive: {METAMAGICAL}");
    }

    let cooldowns = sandbox.engine.cooldowns_for(hero.id());
    if sandbox.engine.cooldowns().is_on_gcd(hero.id()) {
        println!("Global cooldown active.");
    }
    if cooldowns.is_empty() {
        println!("No abilities cooling down.");
    }
    for (name, remaining) in cooldowns {
        println!("  {name}: {remaining} ticks");
    }
}

pub async fn set_state(ctx: &CliContext, label: &str) {
    let Some(state) = PlayState::from_label(label) else {
        println!("Unknown state '{label}'. Try standing, sitting, resting or sleeping.");
        return;
    };
    ctx.sandbox.write().await.world.hero.state = state;
    println!("You are now {}.", state.label());
}

pub async fn learn(ctx: &CliContext, input: &str, level: u32) {
    let mut guard = ctx.sandbox.write().await;
    let Sandbox { engine, world } = &mut *guard;

    if input.eq_ignore_ascii_case(METAMAGICAL) {
        world.hero.add_passive(METAMAGICAL);
        println!("You feel your magic flow more efficiently.");
        return;
    }

    let Some(ability) = engine.registry().find(input) else {
        println!("There is no '{input}' action to learn.");
        return;
    };
    world.hero.learn(ability.id(), level);
    if level == 0 {
        println!("You forget {}.", ability.display_name());
    } else {
        println!("You know {} at level {level}.", ability.display_name());
    }
}

pub async fn tick(ctx: &CliContext, count: u64) {
    let messages = ctx.sandbox.write().await.tick(count);
    for message in messages {
        say(&message);
    }
    println!("{count} ticks pass.");
}

/// Re-read the config file and ability definitions
pub async fn reload(ctx: &CliContext) {
    let config = EngineConfig::load();
    let engine = match CooldownEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!(error = %err, "Reload failed");
            println!("Reload failed: {err}");
            return;
        }
    };
    let count = engine.registry().len();
    ctx.sandbox.write().await.replace_engine(engine);
    *ctx.config.write().await = config;
    clock::restart_clock(ctx).await;
    println!("Reloaded {count} abilities.");
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    let directory = if config.ability_directory.is_empty() {
        "(none)"
    } else {
        config.ability_directory.as_str()
    };
    println!("ability_directory = {directory}");
    println!("tick_ms           = {}", config.tick_ms);
    println!("gcd_ticks         = {}", config.gcd_ticks);
    println!("clock_enabled     = {}", config.clock_enabled);
}

pub async fn save_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    match config.save() {
        Ok(()) => println!("Configuration saved."),
        Err(err) => println!("Failed to save configuration: {err}"),
    }
}

pub fn exit() {
    // Nothing useful to do if stdout is already gone
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "quitting...");
    let _ = stdout.flush();
}
