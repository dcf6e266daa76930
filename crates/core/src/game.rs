//! Game module - the logical-tick orchestrator
//!
//! Owns the board, the current/next piece pair, the RNG, the scoring state,
//! the effect scheduler, and the mode strategy. The caller drives it with
//! [`Game::step`] once per logical tick, passing at most one buffered input
//! event; the wall-clock pacing lives outside the core.
//!
//! Per tick: clear the falling-piece overlay, apply the input (then the mode
//! input hook), apply gravity when the tick lands on the effective drop
//! interval, run the mode tick hook, and redraw the overlay. Locking runs
//! inline within the tick that fails a gravity step or hard-drops:
//! lock -> clear lines -> scoring -> effect bookkeeping -> mode lock hook ->
//! respawn -> game-over check.

use blockfall_types::{InputKey, ModeKind};

use crate::board::Board;
use crate::effects::EffectScheduler;
use crate::modes::{Mode, ModeCtx};
use crate::piece::{try_rotate_cw, Piece};
use crate::rng::SimpleRng;
use crate::scoring::ScoreState;

/// The complete simulation state of one game session
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Piece,
    next: Piece,
    rng: SimpleRng,
    scoring: ScoreState,
    effects: EffectScheduler,
    mode: Mode,
    tick: u64,
    game_over: bool,
}

impl Game {
    /// Create a game with the given RNG seed and mode selection.
    ///
    /// The same seed reproduces the piece sequence and every mode roll.
    pub fn new(seed: u32, mode: ModeKind) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);

        let mut game = Self {
            board: Board::new(),
            current,
            next,
            rng,
            scoring: ScoreState::new(),
            effects: EffectScheduler::new(),
            mode: Mode::new(mode),
            tick: 0,
            game_over: false,
        };
        let (mode, mut ctx) = game.mode_hooks();
        mode.on_start(&mut ctx);
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Advisory text from the mode strategy, queried per render frame.
    pub fn side_note(&self) -> String {
        self.mode.side_note()
    }

    /// Effect scheduler state, for the renderer's advisory lines.
    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    /// Auto-drop interval for the current piece, in ticks.
    pub fn effective_interval(&self) -> u32 {
        self.effects
            .effective_interval(self.scoring.ticks_per_drop())
    }

    /// Split-borrow the mode away from the state it gets to see.
    fn mode_hooks(&mut self) -> (&mut Mode, ModeCtx<'_>) {
        let Game {
            board,
            current,
            next,
            rng,
            scoring,
            effects,
            mode,
            game_over,
            ..
        } = self;
        (
            mode,
            ModeCtx {
                board,
                scoring: &*scoring,
                effects,
                rng,
                current,
                next,
                game_over,
            },
        )
    }

    /// Run one logical tick with at most one buffered input event.
    pub fn step(&mut self, input: Option<InputKey>) {
        if self.game_over {
            return;
        }

        self.board.clear_piece();

        if let Some(key) = input {
            self.handle_input(key);
            if !self.game_over {
                let (mode, mut ctx) = self.mode_hooks();
                mode.on_input(&mut ctx, key);
            }
        }

        if !self.game_over && self.tick % self.effective_interval() as u64 == 0 {
            self.apply_gravity();
        }

        if !self.game_over {
            let tick = self.tick;
            let (mode, mut ctx) = self.mode_hooks();
            mode.on_tick(&mut ctx, tick);
            self.board.draw_piece(&self.current);
        }

        self.tick = self.tick.wrapping_add(1);
    }

    /// The orchestrator's own handling of movement, rotation, and drops.
    /// Unrecognized keys fall through to the mode input hook only.
    fn handle_input(&mut self, key: InputKey) {
        match key {
            InputKey::Left => {
                self.try_shift(-1, 0);
            }
            InputKey::Right => {
                self.try_shift(1, 0);
            }
            InputKey::SoftDrop => {
                self.try_shift(0, 1);
            }
            InputKey::Rotate => {
                if let Some(rotated) = try_rotate_cw(&self.current, |p| self.board.collides(p)) {
                    self.current = rotated;
                }
            }
            InputKey::HardDrop => self.hard_drop(),
            InputKey::PowerUp(_) | InputKey::Other(_) => {}
        }
    }

    /// Move the current piece if the destination is legal.
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let candidate = self.current.translated(dx, dy);
        if self.board.collides(&candidate) {
            return false;
        }
        self.current = candidate;
        true
    }

    /// Advance one row under gravity, locking on contact.
    fn apply_gravity(&mut self) {
        if !self.try_shift(0, 1) {
            self.lock_current();
        }
    }

    /// Drop the current piece as far as it goes and lock it there, all
    /// within the current tick.
    fn hard_drop(&mut self) {
        while self.try_shift(0, 1) {}
        self.lock_current();
    }

    /// The lock pipeline: commit, clear, score, effect bookkeeping, mode
    /// hook, respawn.
    fn lock_current(&mut self) {
        self.board.lock(&self.current);

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.scoring.on_lines_cleared(cleared);
        }

        self.effects.on_lock();
        let (mode, mut ctx) = self.mode_hooks();
        mode.on_lock(&mut ctx);

        self.spawn_next();
    }

    /// Promote the next piece to current and draw a fresh next piece.
    /// Ends the game when the spawn anchor is already blocked.
    fn spawn_next(&mut self) {
        self.current = std::mem::replace(&mut self.next, Piece::random(&mut self.rng));
        self.effects.on_spawn();
        if self.board.collides(&self.current) {
            self.game_over = true;
        }
    }
}
