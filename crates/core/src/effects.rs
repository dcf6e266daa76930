//! Effects module - the stackable drop-interval modifiers
//!
//! Two independent effects can shape the auto-drop interval of the falling
//! piece: a temporary speed-up (scheduled by mode hooks) and a temporary
//! slow-down (the Fun-mode slow power-up). Both are spawn-scoped: once
//! assigned to a piece at spawn time they do not change for that piece's
//! lifetime.
//!
//! Transition rules:
//!
//! - Speed: `Idle --schedule--> Pending --spawn--> Active --lock--> Idle`.
//!   Scheduling happens inside lock handling, after the previous Active was
//!   consumed, so Pending and Active never coexist.
//! - Slow: activation adds to a queue of owed spawns and, if no slow is
//!   active for the current piece, immediately consumes one for it. Every
//!   spawn consumes one while the queue is non-empty; the per-piece flag
//!   clears at lock.

use blockfall_types::{MIN_TICKS_PER_DROP, SLOW_FACTOR, SLOW_PIECES_PER_ACTIVATION};

/// Lifecycle of the speed-up modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedEffect {
    #[default]
    Idle,
    /// Scheduled for the next spawned piece
    Pending(u32),
    /// Applying to the currently falling piece
    Active(u32),
}

/// Tracks both drop-interval modifiers across spawns and locks
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    speed: SpeedEffect,
    /// Future spawns still owed a slow effect
    slow_queue: u32,
    /// Whether the currently falling piece is slowed
    slow_active: bool,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a speed multiplier for the next spawned piece.
    ///
    /// Mode hooks call this from lock handling; a repeated trigger before
    /// the next spawn overwrites the pending value rather than stacking.
    pub fn schedule_speed(&mut self, multiplier: u32) {
        self.speed = SpeedEffect::Pending(multiplier);
    }

    /// Activate the slow effect: three future spawns are owed a slow factor,
    /// and if no slow is active for the current piece, one of them is
    /// consumed for it immediately.
    pub fn activate_slow(&mut self) {
        self.slow_queue += SLOW_PIECES_PER_ACTIVATION;
        if !self.slow_active {
            self.slow_active = true;
            self.slow_queue -= 1;
        }
    }

    /// Fix both effects for a newly spawned piece.
    pub fn on_spawn(&mut self) {
        self.speed = match self.speed {
            SpeedEffect::Pending(multiplier) => SpeedEffect::Active(multiplier),
            _ => SpeedEffect::Idle,
        };
        if self.slow_queue > 0 {
            self.slow_queue -= 1;
            self.slow_active = true;
        } else {
            self.slow_active = false;
        }
    }

    /// Consume the per-piece effects the moment the piece locks.
    pub fn on_lock(&mut self) {
        if let SpeedEffect::Active(_) = self.speed {
            self.speed = SpeedEffect::Idle;
        }
        self.slow_active = false;
    }

    /// Speed multiplier applying to the current piece (1 when none).
    pub fn speed_multiplier(&self) -> u32 {
        match self.speed {
            SpeedEffect::Active(multiplier) => multiplier,
            _ => 1,
        }
    }

    /// Slow factor applying to the current piece (1 when none).
    pub fn slow_factor(&self) -> u32 {
        if self.slow_active {
            SLOW_FACTOR
        } else {
            1
        }
    }

    /// Effective auto-drop interval for the current piece.
    ///
    /// The two modifiers compose multiplicatively, floored at one tick.
    pub fn effective_interval(&self, ticks_per_drop: u32) -> u32 {
        (ticks_per_drop * self.slow_factor() / self.speed_multiplier()).max(MIN_TICKS_PER_DROP)
    }

    /// A speed-up is scheduled but not yet applying (advisory display).
    pub fn speed_pending(&self) -> bool {
        matches!(self.speed, SpeedEffect::Pending(_))
    }

    /// A speed-up applies to the falling piece (advisory display).
    pub fn speed_active(&self) -> bool {
        matches!(self.speed, SpeedEffect::Active(_))
    }

    /// The falling piece is slowed (advisory display).
    pub fn slow_active(&self) -> bool {
        self.slow_active
    }

    /// Future spawns still owed a slow effect.
    pub fn slow_queue(&self) -> u32 {
        self.slow_queue
    }
}
