//! Fixed interval gate for the discrete movement steps.

/// Default seconds between two movement steps.
pub const DEFAULT_TICK_INTERVAL: f32 = 0.10;

/// Accumulates real time and fires once the interval has passed.
///
/// Unlike a regular fixed timestep the accumulator is reset to zero when it fires, so the remainder is discarded instead of being carried over to the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameClock {
    /// Seconds collected since the last step.
    accumulator: f32,
    /// Seconds required for a step.
    interval: f32,
}

impl GameClock {
    /// Create a clock firing every `interval` seconds.
    #[inline]
    #[must_use]
    pub const fn new(interval: f32) -> Self {
        Self {
            accumulator: 0.0,
            interval,
        }
    }

    /// Add elapsed seconds.
    ///
    /// # Returns
    ///
    /// - `true` when a step must be performed, at most once per call no matter how much time passed.
    #[inline]
    pub fn advance(&mut self, elapsed: f32) -> bool {
        self.accumulator += elapsed;

        if self.accumulator >= self.interval {
            self.accumulator = 0.0;

            true
        } else {
            false
        }
    }

    /// Seconds collected since the last step.
    #[inline]
    #[must_use]
    pub const fn accumulated(&self) -> f32 {
        self.accumulator
    }
}

impl Default for GameClock {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
