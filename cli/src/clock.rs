//! Background game clock
//!
//! Advances the sandbox one tick per configured interval and announces
//! cooldowns as they come back.

use std::sync::Arc;

use solace_core::EngineConfigExt;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::CliContext;
use crate::sandbox::render_colors;

/// Start the clock task, or `None` when the clock is disabled
pub async fn start_clock(ctx: &CliContext) -> Option<JoinHandle<()>> {
    let period = {
        let config = ctx.config.read().await;
        if !config.clock_enabled {
            tracing::info!("Game clock disabled, use `tick` to advance time");
            return None;
        }
        config.tick_duration()
    };

    let sandbox = Arc::clone(&ctx.sandbox);
    let handle = tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let messages = sandbox.write().await.tick(1);
            for message in messages {
                println!("{}", render_colors(&message));
            }
        }
    });

    tracing::debug!(?period, "Game clock started");
    Some(handle)
}

/// Stop any running clock and start a new one with the current config
pub async fn restart_clock(ctx: &CliContext) {
    let handle = start_clock(ctx).await;
    let mut tasks = ctx.tasks.lock().await;
    tasks.abort_all();
    tasks.clock = handle;
}
