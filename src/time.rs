//! Frame clock.
//!
//! A single source of elapsed wall time for the effect. All per-frame math
//! takes elapsed seconds explicitly; this clock is the host-side producer
//! of that value. Elapsed time is monotonic and never resets, so lifecycle
//! phases and drift stay continuous across the effect's whole lifetime and
//! animation speed does not depend on frame rate.

use std::time::Instant;

/// Wall-clock frame timer.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the current instant. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Seconds since the clock was created, as of the last tick.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_starts_at_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frame(), 0);
    }

    #[test]
    fn test_tick_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let (elapsed, delta) = clock.tick();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = FrameClock::new();
        let mut last = 0.0;
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(1));
            let (elapsed, _) = clock.tick();
            assert!(elapsed >= last);
            last = elapsed;
        }
    }
}
