//! Input debounce gate.
//!
//! Each intent kind has its own minimum re-trigger interval. A press is
//! accepted when nothing of that kind was accepted yet, or when strictly more
//! than the interval has passed since the last accepted one.

use crate::types::{Intent, HARD_DROP_DEBOUNCE_MS, MOVE_DEBOUNCE_MS, ROTATE_DEBOUNCE_MS};

/// Debounced input channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
}

impl Channel {
    const COUNT: usize = 5;

    fn of(intent: Intent) -> Option<Self> {
        match intent {
            Intent::MoveLeft => Some(Channel::Left),
            Intent::MoveRight => Some(Channel::Right),
            Intent::SoftDrop => Some(Channel::Down),
            Intent::Rotate => Some(Channel::Rotate),
            Intent::HardDrop => Some(Channel::HardDrop),
            Intent::Restart => None,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }

    fn interval_ms(self) -> u64 {
        match self {
            Channel::Left | Channel::Right | Channel::Down => MOVE_DEBOUNCE_MS as u64,
            Channel::Rotate => ROTATE_DEBOUNCE_MS as u64,
            Channel::HardDrop => HARD_DROP_DEBOUNCE_MS as u64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputGate {
    last_accepted: [Option<u64>; Channel::COUNT],
}

impl InputGate {
    pub fn new() -> Self {
        Self {
            last_accepted: [None; Channel::COUNT],
        }
    }

    /// Decide whether `intent` pressed at `now_ms` goes through, recording it if so.
    ///
    /// Intents without a channel (restart) are always let through.
    pub fn permit(&mut self, intent: Intent, now_ms: u64) -> bool {
        let Some(channel) = Channel::of(intent) else {
            return true;
        };

        let slot = &mut self.last_accepted[channel.slot()];
        let open = match *slot {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > channel.interval_ms(),
        };
        if open {
            *slot = Some(now_ms);
        }
        open
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}
