//! Modes module - the Normal/Fun/Hard/Mixed gameplay strategies
//!
//! A mode is a closed tagged union dispatched with an exhaustive match at
//! five lifecycle points: `on_start`, `on_tick`, `on_input`, `on_lock`, and
//! `side_note`. The orchestrator owns exactly one mode value per session,
//! selected before the first tick and never swapped.
//!
//! Hooks receive a [`ModeCtx`], a narrow mutable view over orchestrator
//! state. They run synchronously inside the tick body and must not block.
//!
//! - **Normal**: every hook is a no-op.
//! - **Hard**: each lock event past 500 points rolls a 10% chance of a x3
//!   speed multiplier for the next spawned piece. Memoryless per lock, no
//!   cooldown.
//! - **Fun**: four player-triggered power-ups gated by score thresholds and
//!   lock-event cooldowns.
//! - **Mixed**: selectable placeholder, currently behaves like Normal.

use arrayvec::ArrayVec;

use blockfall_types::{
    InputKey, ModeKind, HARD_SPEED_MULTIPLIER, HARD_TRIGGER_CHANCE, HARD_TRIGGER_MIN_SCORE,
    POWER_UP_COOLDOWNS, POWER_UP_THRESHOLDS, PURGE_ROWS,
};

use crate::board::Board;
use crate::effects::EffectScheduler;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::ScoreState;

/// The mutable slice of orchestrator state visible to mode hooks
pub struct ModeCtx<'a> {
    pub board: &'a mut Board,
    pub scoring: &'a ScoreState,
    pub effects: &'a mut EffectScheduler,
    pub rng: &'a mut SimpleRng,
    pub current: &'a mut Piece,
    pub next: &'a mut Piece,
    pub game_over: &'a mut bool,
}

impl ModeCtx<'_> {
    /// Discard the current piece and promote the next piece to current,
    /// drawing a fresh next piece.
    ///
    /// This is a spawn: spawn-scoped effects are fixed for the promoted
    /// piece, and a blocked spawn anchor ends the game.
    pub fn swap_in_next_piece(&mut self) {
        let fresh = Piece::random(self.rng);
        *self.current = std::mem::replace(self.next, fresh);
        self.effects.on_spawn();
        if self.board.collides(self.current) {
            *self.game_over = true;
        }
    }
}

/// Lifecycle of a Fun-mode power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Score threshold not yet reached
    Locked,
    /// Available; waiting for the player to press its key
    Ready,
    /// Used; counts lock events until the cooldown elapses
    Cooling(u32),
}

#[derive(Debug, Clone)]
struct PowerUp {
    key: char,
    label: &'static str,
    threshold: u32,
    cooldown: u32,
    phase: Phase,
}

const POWER_UP_KEYS: [char; 4] = ['1', '2', '3', '4'];
const POWER_UP_LABELS: [&str; 4] = ["fill gap", "swap piece", "slow fall", "clear rows"];

/// State of the Fun-mode power-up economy
#[derive(Debug, Clone)]
pub struct FunState {
    power_ups: [PowerUp; 4],
}

impl FunState {
    pub fn new() -> Self {
        Self {
            power_ups: std::array::from_fn(|i| PowerUp {
                key: POWER_UP_KEYS[i],
                label: POWER_UP_LABELS[i],
                threshold: POWER_UP_THRESHOLDS[i],
                cooldown: POWER_UP_COOLDOWNS[i],
                phase: Phase::Locked,
            }),
        }
    }

    /// Advance every power-up's lifecycle by one lock event.
    ///
    /// Once a threshold has been crossed, readiness is a pure cooldown loop:
    /// `Cooling` counts lock events and returns to `Ready` without consulting
    /// the score again.
    fn on_lock(&mut self, ctx: &mut ModeCtx) {
        for power_up in &mut self.power_ups {
            power_up.phase = match power_up.phase {
                Phase::Locked if ctx.scoring.score() >= power_up.threshold => Phase::Ready,
                Phase::Cooling(count) => {
                    let count = count + 1;
                    if count >= power_up.cooldown {
                        Phase::Ready
                    } else {
                        Phase::Cooling(count)
                    }
                }
                other => other,
            };
        }
    }

    /// Try to activate the power-up bound to `key`; a no-op unless Ready.
    fn on_input(&mut self, ctx: &mut ModeCtx, key: InputKey) {
        let InputKey::PowerUp(n) = key else {
            return;
        };
        let Some(power_up) = self
            .power_ups
            .get_mut((n as usize).wrapping_sub(1))
        else {
            return;
        };
        if power_up.phase != Phase::Ready {
            return;
        }
        power_up.phase = Phase::Cooling(0);

        match n {
            1 => {
                ctx.board.fill_bottom_gap();
            }
            2 => ctx.swap_in_next_piece(),
            3 => ctx.effects.activate_slow(),
            4 => {
                ctx.board.remove_top_occupied_rows(PURGE_ROWS);
            }
            _ => {}
        }
    }

    /// Advisory line listing the currently-ready power-ups.
    fn side_note(&self) -> String {
        let ready: ArrayVec<&PowerUp, 4> = self
            .power_ups
            .iter()
            .filter(|p| p.phase == Phase::Ready)
            .collect();
        if ready.is_empty() {
            return String::new();
        }
        let mut note = String::from("ready:");
        for power_up in ready {
            note.push_str(&format!(" [{}] {}", power_up.key, power_up.label));
        }
        note
    }
}

impl Default for FunState {
    fn default() -> Self {
        Self::new()
    }
}

/// The active gameplay strategy, one value per session
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    Fun(FunState),
    Hard,
    Mixed,
}

impl Mode {
    pub fn new(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Normal => Mode::Normal,
            ModeKind::Fun => Mode::Fun(FunState::new()),
            ModeKind::Hard => Mode::Hard,
            ModeKind::Mixed => Mode::Mixed,
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal => ModeKind::Normal,
            Mode::Fun(_) => ModeKind::Fun,
            Mode::Hard => ModeKind::Hard,
            Mode::Mixed => ModeKind::Mixed,
        }
    }

    /// Invoked once, before the first tick. No current variant uses it.
    pub fn on_start(&mut self, _ctx: &mut ModeCtx) {}

    /// Invoked once per logical tick, after input and gravity processing.
    /// No current variant uses it.
    pub fn on_tick(&mut self, _ctx: &mut ModeCtx, _tick: u64) {}

    /// Invoked once per accepted key event, after the orchestrator's own
    /// movement/rotation/hard-drop handling for that key.
    pub fn on_input(&mut self, ctx: &mut ModeCtx, key: InputKey) {
        match self {
            Mode::Normal | Mode::Hard | Mode::Mixed => {}
            Mode::Fun(state) => state.on_input(ctx, key),
        }
    }

    /// Invoked once per piece lock, after line-clear and scoring, before the
    /// next piece is spawned. The only hook allowed to schedule effects for
    /// the next piece.
    pub fn on_lock(&mut self, ctx: &mut ModeCtx) {
        match self {
            Mode::Normal | Mode::Mixed => {}
            Mode::Hard => {
                if ctx.scoring.score() >= HARD_TRIGGER_MIN_SCORE
                    && ctx.rng.next_range(100) < HARD_TRIGGER_CHANCE
                {
                    ctx.effects.schedule_speed(HARD_SPEED_MULTIPLIER);
                }
            }
            Mode::Fun(state) => state.on_lock(ctx),
        }
    }

    /// Advisory text for the renderer; side-effect-free, empty when the mode
    /// has nothing to say.
    pub fn side_note(&self) -> String {
        match self {
            Mode::Normal | Mode::Hard | Mode::Mixed => String::new(),
            Mode::Fun(state) => state.side_note(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::{Cell, ShapeKind, BOARD_WIDTH};

    struct Fixture {
        board: Board,
        scoring: ScoreState,
        effects: EffectScheduler,
        rng: SimpleRng,
        current: Piece,
        next: Piece,
        game_over: bool,
    }

    impl Fixture {
        fn new() -> Self {
            let mut rng = SimpleRng::new(42);
            let current = Piece::random(&mut rng);
            let next = Piece::random(&mut rng);
            Self {
                board: Board::new(),
                scoring: ScoreState::new(),
                effects: EffectScheduler::new(),
                rng,
                current,
                next,
                game_over: false,
            }
        }

        fn with_score(score: u32) -> Self {
            let mut fx = Self::new();
            fx.scoring.set_score_for_test(score);
            fx
        }

        fn ctx(&mut self) -> ModeCtx<'_> {
            ModeCtx {
                board: &mut self.board,
                scoring: &self.scoring,
                effects: &mut self.effects,
                rng: &mut self.rng,
                current: &mut self.current,
                next: &mut self.next,
                game_over: &mut self.game_over,
            }
        }
    }

    // Seeds with known first LCG rolls in [0,100): 1975 -> 2, 2003 -> 2
    // then 1, 1 -> 48.
    const SEED_ROLL_HIT: u32 = 1975;
    const SEED_ROLL_HIT_TWICE: u32 = 2003;
    const SEED_ROLL_MISS: u32 = 1;

    #[test]
    fn test_normal_mode_hooks_touch_nothing() {
        let mut fx = Fixture::with_score(10_000);
        let rng_state = fx.rng.state();
        let mut mode = Mode::new(ModeKind::Normal);

        let mut ctx = fx.ctx();
        mode.on_lock(&mut ctx);
        mode.on_input(&mut ctx, InputKey::PowerUp(1));

        assert_eq!(fx.rng.state(), rng_state);
        assert!(!fx.effects.speed_pending());
        assert_eq!(mode.side_note(), "");
    }

    #[test]
    fn test_mixed_mode_behaves_like_normal() {
        let mut fx = Fixture::with_score(10_000);
        let mut mode = Mode::new(ModeKind::Mixed);
        mode.on_lock(&mut fx.ctx());
        assert!(!fx.effects.speed_pending());
        assert_eq!(mode.side_note(), "");
    }

    #[test]
    fn test_hard_does_not_roll_below_min_score() {
        let mut fx = Fixture::with_score(HARD_TRIGGER_MIN_SCORE - 1);
        fx.rng = SimpleRng::new(SEED_ROLL_HIT);
        let rng_state = fx.rng.state();
        let mut mode = Mode::Hard;

        mode.on_lock(&mut fx.ctx());

        // No roll was drawn at all.
        assert_eq!(fx.rng.state(), rng_state);
        assert!(!fx.effects.speed_pending());
    }

    #[test]
    fn test_hard_schedules_speed_on_winning_roll() {
        let mut fx = Fixture::with_score(HARD_TRIGGER_MIN_SCORE);
        fx.rng = SimpleRng::new(SEED_ROLL_HIT);
        let mut mode = Mode::Hard;

        mode.on_lock(&mut fx.ctx());
        assert!(fx.effects.speed_pending());

        // The multiplier applies to the next spawned piece only.
        fx.effects.on_spawn();
        assert!(fx.effects.speed_active());
        assert_eq!(fx.effects.effective_interval(10), 3);

        // And is cleared the moment that piece locks.
        fx.effects.on_lock();
        assert!(!fx.effects.speed_active());
        assert_eq!(fx.effects.effective_interval(10), 10);
    }

    #[test]
    fn test_hard_losing_roll_schedules_nothing() {
        let mut fx = Fixture::with_score(HARD_TRIGGER_MIN_SCORE);
        fx.rng = SimpleRng::new(SEED_ROLL_MISS);
        let mut mode = Mode::Hard;

        mode.on_lock(&mut fx.ctx());
        assert!(!fx.effects.speed_pending());
    }

    #[test]
    fn test_hard_triggers_are_memoryless() {
        let mut fx = Fixture::with_score(HARD_TRIGGER_MIN_SCORE);
        fx.rng = SimpleRng::new(SEED_ROLL_HIT_TWICE);
        let mut mode = Mode::Hard;

        // Two consecutive locks can both trigger; there is no cooldown.
        mode.on_lock(&mut fx.ctx());
        assert!(fx.effects.speed_pending());
        fx.effects.on_spawn();

        fx.effects.on_lock();
        mode.on_lock(&mut fx.ctx());
        assert!(fx.effects.speed_pending());
    }

    #[test]
    fn test_fun_power_up_unlocks_at_threshold() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[0] - 1);
        let mut mode = Mode::new(ModeKind::Fun);

        mode.on_lock(&mut fx.ctx());
        assert_eq!(mode.side_note(), "");

        fx.scoring.set_score_for_test(POWER_UP_THRESHOLDS[0]);
        mode.on_lock(&mut fx.ctx());
        assert_eq!(mode.side_note(), "ready: [1] fill gap");
    }

    #[test]
    fn test_fun_side_note_lists_all_ready_power_ups() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[1]);
        let mut mode = Mode::new(ModeKind::Fun);

        mode.on_lock(&mut fx.ctx());
        assert_eq!(mode.side_note(), "ready: [1] fill gap [2] swap piece");
    }

    #[test]
    fn test_fun_activation_is_noop_when_not_ready() {
        let mut fx = Fixture::new();
        let mut mode = Mode::new(ModeKind::Fun);
        let next_before = fx.next;

        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(2));

        assert_eq!(fx.next, next_before);
        assert!(fx.board.cells().iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_fun_fill_gap_power_up() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[0]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());

        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(1));

        assert_eq!(fx.board.get(0, 19), Some(Cell::Garbage));
        // Used: no longer listed as ready.
        assert_eq!(mode.side_note(), "");
    }

    #[test]
    fn test_fun_swap_power_up_promotes_next_piece() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[1]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());

        let promoted = fx.next;
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(2));

        assert_eq!(fx.current, promoted);
        assert!(!fx.game_over);
    }

    #[test]
    fn test_fun_swap_into_blocked_spawn_ends_game() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[1]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());

        // Wall off the spawn area so the promoted piece collides.
        for x in 0..BOARD_WIDTH as i8 {
            for y in 0..3 {
                fx.board.set(x, y, Cell::Locked(ShapeKind::I));
            }
        }
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(2));
        assert!(fx.game_over);
    }

    #[test]
    fn test_fun_slow_power_up_activates_slow_effect() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[2]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());

        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(3));

        assert!(fx.effects.slow_active());
        assert_eq!(fx.effects.slow_queue(), 2);
    }

    #[test]
    fn test_fun_purge_power_up_removes_top_rows() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[3]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());

        for y in [5i8, 9, 12, 19] {
            fx.board.set(0, y, Cell::Locked(ShapeKind::T));
        }
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(4));

        // The three topmost occupied rows are gone; the bottom one shifted
        // down stays (already at the bottom).
        let solid = fx.board.cells().iter().filter(|c| c.is_solid()).count();
        assert_eq!(solid, 1);
        assert_eq!(fx.board.get(0, 19), Some(Cell::Locked(ShapeKind::T)));
    }

    #[test]
    fn test_fun_cooldown_takes_exactly_fifteen_locks() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[0]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(1));

        for _ in 0..POWER_UP_COOLDOWNS[0] - 1 {
            mode.on_lock(&mut fx.ctx());
            assert_eq!(mode.side_note(), "");
        }
        mode.on_lock(&mut fx.ctx());
        assert_eq!(mode.side_note(), "ready: [1] fill gap");
    }

    #[test]
    fn test_fun_readiness_is_not_regated_by_score() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[0]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(1));

        // Even with the score below the threshold, the cooldown alone
        // brings the power-up back.
        fx.scoring.set_score_for_test(0);
        for _ in 0..POWER_UP_COOLDOWNS[0] {
            mode.on_lock(&mut fx.ctx());
        }
        assert_eq!(mode.side_note(), "ready: [1] fill gap");
    }

    #[test]
    fn test_fun_fourth_power_up_has_longer_cooldown() {
        let mut fx = Fixture::with_score(POWER_UP_THRESHOLDS[3]);
        let mut mode = Mode::new(ModeKind::Fun);
        mode.on_lock(&mut fx.ctx());
        mode.on_input(&mut fx.ctx(), InputKey::PowerUp(4));

        for _ in 0..POWER_UP_COOLDOWNS[3] - 1 {
            mode.on_lock(&mut fx.ctx());
        }
        assert!(!mode.side_note().contains("[4]"));
        mode.on_lock(&mut fx.ctx());
        assert!(mode.side_note().contains("[4] clear rows"));
    }

    #[test]
    fn test_mode_kind_round_trip() {
        for kind in [ModeKind::Normal, ModeKind::Fun, ModeKind::Hard, ModeKind::Mixed] {
            assert_eq!(Mode::new(kind).kind(), kind);
        }
    }
}
