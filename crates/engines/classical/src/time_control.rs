//! Search limits and the clock that enforces them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Depth and time constraints for one search. Whichever runs out first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Maximum time for this move (None = infinite)
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
        }
    }

    /// Time-only limit, searching as deep as the clock allows.
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Tracks whether the current search has run out of time.
///
/// The clock starts on construction. `is_stopped` is a single atomic load;
/// the actual clock read happens in `check_time`, which callers only invoke
/// every `check_interval` nodes.
#[derive(Debug)]
pub struct TimeControl {
    stopped: AtomicBool,
    started: Instant,
    time_limit: Option<Duration>,
    check_interval: u64,
}

impl TimeControl {
    pub fn start(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: AtomicBool::new(false),
            started: Instant::now(),
            time_limit,
            check_interval: 1024,
        }
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and latches the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        match self.time_limit {
            Some(limit) if self.started.elapsed() >= limit => {
                self.stop();
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
