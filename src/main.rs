//! Blockfall runner (default binary).
//!
//! Menu, then the fixed-tick game loop: the simulation advances once per
//! `TICK_MS`, consuming at most one buffered key per tick; rendering and
//! input polling fill the time in between.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;

use blockfall::core::Game;
use blockfall::highscore::{HighscoreStore, DEFAULT_PATH};
use blockfall::input::{map_key, should_quit, InputSource};
use blockfall::menu;
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::{InputKey, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut store = HighscoreStore::open(DEFAULT_PATH);

    let selection = menu::run(term, store.best())?;
    let Some(mode) = selection.mode_kind() else {
        return Ok(());
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);
    let mut game = Game::new(seed, mode);

    let view = GameView::default();
    let mut input = InputSource::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut pending: Option<InputKey> = None;

    while !game.game_over() {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        term.draw(&view.render(&game, store.best(), Viewport::new(w, h)))?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if let Some(key) = input.poll_timeout(timeout)? {
            if should_quit(key) {
                return Ok(());
            }
            if pending.is_none() {
                pending = map_key(key);
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.step(pending.take());
        }
    }

    // Final frame with the game-over banner, then wait for any key.
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    term.draw(&view.render(&game, store.best(), Viewport::new(w, h)))?;
    wait_for_key(&mut input)?;

    store.save_if_higher(game.score());
    Ok(())
}

fn wait_for_key(input: &mut InputSource) -> Result<()> {
    loop {
        if input.poll_timeout(Duration::from_millis(250))?.is_some() {
            return Ok(());
        }
    }
}
