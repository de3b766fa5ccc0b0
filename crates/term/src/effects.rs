//! Short-lived visual effects driven by game events.
//!
//! Effects only read [`GameEvent`]s and wall-clock frame time; they never
//! touch the session.

use crate::types::GameEvent;

/// How long the board frame flashes after a line clear
pub const LINE_FLASH_MS: u32 = 500;

/// How long the level-up banner stays up
pub const LEVEL_BANNER_MS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LineFlash { lines: u32, remaining_ms: u32 },
    LevelBanner { level: u32, remaining_ms: u32 },
}

impl Effect {
    pub fn line_flash(lines: u32) -> Self {
        Effect::LineFlash {
            lines,
            remaining_ms: LINE_FLASH_MS,
        }
    }

    pub fn level_banner(level: u32) -> Self {
        Effect::LevelBanner {
            level,
            remaining_ms: LEVEL_BANNER_MS,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        match self {
            Effect::LineFlash { remaining_ms, .. } => {
                *remaining_ms = remaining_ms.saturating_sub(elapsed_ms)
            }
            Effect::LevelBanner { remaining_ms, .. } => {
                *remaining_ms = remaining_ms.saturating_sub(elapsed_ms)
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        match self {
            Effect::LineFlash { remaining_ms, .. } => *remaining_ms == 0,
            Effect::LevelBanner { remaining_ms, .. } => *remaining_ms == 0,
        }
    }
}

/// Active effects, at most one of each kind
#[derive(Debug, Clone, Default)]
pub struct Effects {
    active: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or restart the effect that matches `event`
    pub fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::LinesCleared { count } => {
                self.active.retain(|e| !matches!(e, Effect::LineFlash { .. }));
                self.active.push(Effect::line_flash(count));
            }
            GameEvent::LevelUp { level } => {
                self.active.retain(|e| !matches!(e, Effect::LevelBanner { .. }));
                self.active.push(Effect::level_banner(level));
            }
            GameEvent::Reset => self.clear(),
            _ => {}
        }
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        for e in self.active.iter_mut() {
            e.advance(elapsed_ms);
        }
        self.active.retain(|e| !e.is_expired());
    }

    /// Lines of the clear currently flashing
    pub fn flash(&self) -> Option<u32> {
        self.active.iter().find_map(|e| match e {
            Effect::LineFlash { lines, .. } => Some(*lines),
            _ => None,
        })
    }

    /// Level shown on the banner, if it is up
    pub fn banner(&self) -> Option<u32> {
        self.active.iter().find_map(|e| match e {
            Effect::LevelBanner { level, .. } => Some(*level),
            _ => None,
        })
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
