#[cfg(feature = "platform_wasm")]
use instant::Instant;
#[cfg(not(feature = "platform_wasm"))]
use std::time::Instant;

use std::fmt;

/// A wall clock started at a given point.
/// Every search driver owns one; nothing depends on a process-wide start time.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Clock {
            start: Instant::now(),
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.3}s", self.elapsed())
    }
}

impl Clock {
    /// restart the clock.
    pub fn start(&mut self) {
        self.start = Instant::now();
    }
    /// return the elapsed time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
    /// return `true` if `limit` seconds have passed.
    pub fn is_over(&self, limit: f64) -> bool {
        limit <= self.elapsed()
    }
}
