//! Session statistics: moves, matched pairs and the game clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format whole seconds as `m:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clock {
    NotStarted,
    Running { started_at: DateTime<Utc> },
    Stopped { elapsed_seconds: u64 },
}

/// Point-in-time view of the stats, as shown next to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    /// `None` until the first card is turned.
    pub elapsed_seconds: Option<u64>,
    pub elapsed: String,
}

/// Counters and clock for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    moves: u32,
    matched_pairs: usize,
    clock: Clock,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            moves: 0,
            matched_pairs: 0,
            clock: Clock::NotStarted,
        }
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn record_move(&mut self) {
        self.moves += 1;
    }

    pub fn record_match(&mut self) {
        self.matched_pairs += 1;
    }

    /// Start the clock if it has not started yet. Returns true when it started now.
    pub fn start_clock(&mut self, now: DateTime<Utc>) -> bool {
        if self.clock != Clock::NotStarted {
            return false;
        }
        self.clock = Clock::Running { started_at: now };
        true
    }

    /// Freeze the clock at its current reading.
    pub fn stop_clock(&mut self, now: DateTime<Utc>) {
        if let Clock::Running { started_at } = self.clock {
            self.clock = Clock::Stopped {
                elapsed_seconds: seconds_between(started_at, now),
            };
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.clock, Clock::Running { .. })
    }

    /// Whole seconds on the clock, or `None` when it never started.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        match self.clock {
            Clock::NotStarted => None,
            Clock::Running { started_at } => Some(seconds_between(started_at, now)),
            Clock::Stopped { elapsed_seconds } => Some(elapsed_seconds),
        }
    }

    /// Zero the counters and clear the clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self, now: DateTime<Utc>, total_pairs: usize) -> StatsSnapshot {
        let elapsed_seconds = self.elapsed_seconds(now);
        StatsSnapshot {
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs,
            elapsed_seconds,
            elapsed: format_elapsed(elapsed_seconds.unwrap_or(0)),
        }
    }
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    u64::try_from((end - start).num_seconds()).unwrap_or(0)
}
