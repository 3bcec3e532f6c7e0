//! Terminal runner (default binary).
//!
//! Owns the pacing clock: the engine is ticked every `step_interval_ms` and the
//! deadline is restarted whenever the engine reports a new interval or a phase
//! change. Logs go to a file so the board is not disturbed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::core::{EngineConfig, GameEngine};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::TerminalRenderer;
use blockfall::types::GameEvent;

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env();
    let mut engine = GameEngine::new(config).context("invalid engine configuration")?;
    info!(seed = ?engine.config().seed, "starting blockfall");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let path = std::env::var("BLOCKFALL_LOG_PATH").unwrap_or_else(|_| "blockfall.log".to_string());
    let log_file = std::fs::File::create(&path).with_context(|| format!("creating {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine) -> Result<()> {
    let mut interval = Duration::from_millis(u64::from(engine.step_interval_ms()));
    let mut next_tick = Instant::now() + interval;
    let mut dirty = true;

    loop {
        if dirty {
            term.draw(&engine.snapshot())?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = engine.score(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.apply(command);
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if engine.phase().is_ticking() && Instant::now() >= next_tick {
            engine.on_pacing_tick();
            next_tick = Instant::now() + interval;
        }

        for event in engine.drain_events() {
            dirty = true;
            if let GameEvent::IntervalChanged(ms) = event {
                interval = Duration::from_millis(u64::from(ms));
                next_tick = Instant::now() + interval;
                debug!(ms, "pacing interval changed");
            }
        }

        // Hold the clock while stopped so resuming gets a full interval
        if !engine.phase().is_ticking() {
            next_tick = Instant::now() + interval;
        }
    }
}
