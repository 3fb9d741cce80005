//! Terminal dice puzzle runner (default binary).
//!
//! Reads configuration from `DICE_*` variables and flags, then runs a fixed
//! timestep loop: crossterm for input, the framebuffer view for output.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tui_dice::config::GameConfig;
use tui_dice::core::{Game, GameSnapshot, HintSnapshot};
use tui_dice::input::{handle_key_event, is_hint_toggle, should_quit};
use tui_dice::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_dice::types::TICK_MS;

fn main() -> Result<()> {
    let mut config = GameConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;
    config.validate()?;
    init_logging(config.log_path.as_deref())?;
    info!("starting {:?}", config);

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `path` when given. The screen belongs to the game, so there is
/// no stderr fallback.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let mut game = Game::with_seed(config.width, config.height, config.seed);
    game.on_collected_count_changed(|count| debug!("collected count changed to {}", count));
    game.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut show_hint = false;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        if show_hint {
            snap.hint = game.hint().as_ref().and_then(HintSnapshot::from_route);
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit after {} moves", game.move_count());
                        return Ok(());
                    }
                    if is_hint_toggle(key) {
                        show_hint = !show_hint;
                    } else if let Some(action) = handle_key_event(key) {
                        if !game.apply_action(action) {
                            debug!("{} ignored", action.as_str());
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if game.tick(config.angle_step) {
                if let Some(event) = game.take_last_event() {
                    debug!(
                        "landed at ({}, {}) showing {}",
                        event.position.x, event.position.y, event.top_value
                    );
                }
            }
        }
    }
}
