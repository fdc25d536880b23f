use clap::{Parser, Subcommand};
use solace_cli::CliContext;
use solace_cli::clock;
use solace_cli::commands;
use solace_cli::logging;
use solace_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();

    let ctx = CliContext::new().map_err(|e| e.to_string())?;
    {
        let count = ctx.sandbox.read().await.engine.registry().len();
        tracing::info!(abilities = count, "Cooldown engine ready");
    }

    if let Some(handle) = clock::start_clock(&ctx).await {
        ctx.tasks.lock().await.clock = Some(handle);
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.tasks.lock().await.abort_all();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "solace cooldown sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered abilities
    Abilities,
    /// Use an ability, optionally against a target
    Use {
        ability: String,
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Create a training dummy
    Spawn {
        #[arg(short, long)]
        name: String,
        #[arg(long, default_value_t = 100)]
        hp: i32,
        #[arg(long)]
        max_hp: Option<i32>,
    },
    Targets,
    Status,
    /// Change what you are doing (standing, sitting, resting, sleeping)
    State { name: String },
    /// Learn an ability at a level (0 forgets it)
    Learn {
        ability: String,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },
    /// Advance the game clock
    Tick {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,
    },
    /// Reload config and ability definitions
    Reload,
    Config {
        /// Write the current configuration to disk
        #[arg(long)]
        save: bool,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "solace".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Abilities) => commands::list_abilities(ctx).await,
        Some(Commands::Use { ability, target }) => {
            commands::use_ability(ctx, ability, target.as_deref()).await
        }
        Some(Commands::Spawn { name, hp, max_hp }) => {
            commands::spawn(ctx, name, *hp, *max_hp).await
        }
        Some(Commands::Targets) => commands::list_targets(ctx).await,
        Some(Commands::Status) => commands::show_status(ctx).await,
        Some(Commands::State { name }) => commands::set_state(ctx, name).await,
        Some(Commands::Learn { ability, level }) => commands::learn(ctx, ability, *level).await,
        Some(Commands::Tick { count }) => commands::tick(ctx, *count).await,
        Some(Commands::Reload) => commands::reload(ctx).await,
        Some(Commands::Config { save }) => {
            if *save {
                commands::save_config(ctx).await;
            }
            commands::show_config(ctx).await
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Cli {
        let mut args = shlex::split(line).unwrap();
        args.insert(0, "solace".to_string());
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_use_with_quoted_target() {
        let cli = parse("use coup -t 'training dummy'");
        match cli.command {
            Some(Commands::Use { ability, target }) => {
                assert_eq!(ability, "coup");
                assert_eq!(target.as_deref(), Some("training dummy"));
            }
            _ => panic!("expected use"),
        }
    }

    #[test]
    fn parses_spawn_and_defaults() {
        match parse("spawn -n rat --hp 19 --max-hp 100").command {
            Some(Commands::Spawn { name, hp, max_hp }) => {
                assert_eq!(name, "rat");
                assert_eq!(hp, 19);
                assert_eq!(max_hp, Some(100));
            }
            _ => panic!("expected spawn"),
        }
        assert!(matches!(
            parse("tick").command,
            Some(Commands::Tick { count: 1 })
        ));
        assert!(matches!(
            parse("learn flurry").command,
            Some(Commands::Learn { level: 1, .. })
        ));
    }

    #[test]
    fn unknown_command_is_an_error() {
        let args = vec!["solace".to_string(), "dance".to_string()];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
