//! Scoring module - classic line-clear points and the level curve
//!
//! Points depend on the level at the time of the clear (pre-update). Level
//! and drop speed are recomputed from the cumulative line count rather than
//! incremented, so a clear that jumps several levels lands on the right
//! speed in one step.

use blockfall_types::{BASE_TICKS_PER_DROP, LINES_PER_LEVEL, LINE_SCORES, MIN_TICKS_PER_DROP};

/// Points awarded for clearing `cleared` rows at `level`.
///
/// Counts outside 1..=4 score zero; a single lock cannot clear more than the
/// four rows a piece matrix spans.
pub fn line_clear_points(cleared: usize, level: u32) -> u32 {
    if cleared == 0 || cleared > 4 {
        return 0;
    }
    LINE_SCORES[cleared] * (level + 1)
}

/// Gravity interval in ticks for a level, floored at one tick per row.
pub fn ticks_per_drop_for(level: u32) -> u32 {
    BASE_TICKS_PER_DROP
        .saturating_sub(level)
        .max(MIN_TICKS_PER_DROP)
}

/// Cumulative score, line count, and the derived level/drop-speed pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    level: u32,
    ticks_per_drop: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 0,
            ticks_per_drop: BASE_TICKS_PER_DROP,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ticks_per_drop(&self) -> u32 {
        self.ticks_per_drop
    }

    /// Record a lock event that removed `cleared` rows.
    ///
    /// Points use the level before the update; the level and drop interval
    /// are then recomputed from the new cumulative line count.
    pub fn on_lines_cleared(&mut self, cleared: usize) {
        self.score += line_clear_points(cleared, self.level);
        self.lines += cleared as u32;

        let new_level = self.lines / LINES_PER_LEVEL;
        if new_level > self.level {
            self.level = new_level;
            self.ticks_per_drop = ticks_per_drop_for(new_level);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score_for_test(&mut self, score: u32) {
        self.score = score;
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
