//! Scoring module - line-clear points, level progression and gravity
//!
//! Points for a clear are `LINE_SCORES[n] * level`; clears larger than the table
//! reuse its last entry. Hard drops add one point per row descended.
//!
//! Level-ups are evaluated once per lock and raise the level by at most one,
//! even when a single clear crosses two multiples of `LINES_PER_LEVEL`.

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_MIN_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, START_LEVEL,
};

/// Result of recording one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points added for the cleared rows
    pub line_clear_score: u32,
    /// Level after the lock, if it changed
    pub new_level: Option<u32>,
}

/// Base points for a clear of `lines` rows at level 1.
///
/// Total for every input: counts beyond the table reuse the highest entry.
pub fn line_clear_base(lines: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx]
}

/// Points for clearing `lines` rows at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    line_clear_base(lines).saturating_mul(level)
}

/// Gravity interval after one level-up, floored at the minimum
pub fn next_gravity_ms(current_ms: u32) -> u32 {
    current_ms.saturating_sub(GRAVITY_STEP_MS).max(GRAVITY_MIN_MS)
}

/// Whether the cumulative line count has reached the next level threshold
pub fn level_threshold_reached(total_lines: u32, level: u32) -> bool {
    total_lines / LINES_PER_LEVEL >= level
}

/// Score, level, line counter and gravity of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: START_LEVEL,
            lines: 0,
            gravity_ms: BASE_GRAVITY_MS,
        }
    }

    /// Award hard-drop points (one per row descended)
    pub fn add_drop_points(&mut self, rows: u32) {
        self.score = self.score.saturating_add(rows);
    }

    /// Apply the outcome of one lock that cleared `cleared` rows
    pub fn record_lock(&mut self, cleared: u32) -> ScoreResult {
        let line_clear_score = calculate_line_score(cleared, self.level);
        self.score = self.score.saturating_add(line_clear_score);
        self.lines = self.lines.saturating_add(cleared);

        // Level is only re-checked on locks that clear something
        let new_level = if cleared > 0 && level_threshold_reached(self.lines, self.level) {
            self.level += 1;
            self.gravity_ms = next_gravity_ms(self.gravity_ms);
            Some(self.level)
        } else {
            None
        };

        ScoreResult {
            line_clear_score,
            new_level,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
