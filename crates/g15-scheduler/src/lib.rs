//! Wall-clock pacing for the word-time clock.
//!
//! The drum turns at a fixed, real angular speed; the interpreter's tick
//! loop is free to run far ahead of that in virtual time, so something has
//! to hold it back to the rate a physical drum would actually deliver. This
//! crate is that something, generalized out of the frame-pacing loop a
//! raster-based emulator would inline directly in its `main`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use g15_core::WORDS_PER_REVOLUTION;

/// Paces word-time advances to a target wall-clock rate.
pub struct TimingScheduler {
    word_time: Duration,
    next_deadline: Instant,
}

impl TimingScheduler {
    /// Build a scheduler that releases one word-time every `word_time` of
    /// wall-clock time.
    #[must_use]
    pub fn new(word_time: Duration) -> Self {
        Self {
            word_time,
            next_deadline: Instant::now(),
        }
    }

    /// Build a scheduler from the drum's rotational speed in RPM.
    #[must_use]
    pub fn from_drum_rpm(rpm: f64) -> Self {
        let revolution = Duration::from_secs_f64(60.0 / rpm);
        Self::new(revolution / WORDS_PER_REVOLUTION)
    }

    #[must_use]
    pub fn word_time(&self) -> Duration {
        self.word_time
    }

    /// Block until wall-clock time reaches the next word-time boundary,
    /// waking periodically to check `cancel`. Returns `false` if `cancel`
    /// was observed set before the deadline, in which case the caller
    /// should treat the current operation as interrupted rather than timed.
    pub fn wait_for_next_word_time(&mut self, cancel: &AtomicBool) -> bool {
        self.next_deadline += self.word_time;
        loop {
            if cancel.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            if now >= self.next_deadline {
                return true;
            }
            let remaining = self.next_deadline - now;
            std::thread::sleep(remaining.min(Duration::from_millis(2)));
        }
    }

    /// Drop any accumulated lag and restart pacing from the current instant,
    /// e.g. after the machine was paused and resumed.
    pub fn resync(&mut self) {
        self.next_deadline = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_time_from_rpm_matches_a_revolution_over_word_count() {
        let scheduler = TimingScheduler::from_drum_rpm(1800.0);
        let revolution = Duration::from_secs_f64(60.0 / 1800.0);
        assert_eq!(scheduler.word_time(), revolution / WORDS_PER_REVOLUTION);
    }

    #[test]
    fn wait_returns_true_once_deadline_passes() {
        let mut scheduler = TimingScheduler::new(Duration::from_micros(50));
        let cancel = AtomicBool::new(false);
        assert!(scheduler.wait_for_next_word_time(&cancel));
    }

    #[test]
    fn wait_returns_false_when_canceled() {
        let mut scheduler = TimingScheduler::new(Duration::from_secs(5));
        let cancel = AtomicBool::new(true);
        assert!(!scheduler.wait_for_next_word_time(&cancel));
    }
}
