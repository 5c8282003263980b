//! Clock and sampling utilities for touch streams.
//!
//! Pointer snapshots carry monotonic millisecond timestamps relative to
//! the moment a stream started.

/// Convert a millisecond timestamp or duration to seconds.
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1_000.0
}

/// Rate controller for event sampling.
#[derive(Debug, Clone)]
pub struct RateController {
    target_interval_ms: u64,
    last_tick_ms: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    ///
    /// Rates above 1 kHz collapse to a 1 ms interval.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ms: (1_000 / target_hz.max(1) as u64).max(1),
            last_tick_ms: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ms: u64) -> bool {
        match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            Some(last) if current_ms >= last + self.target_interval_ms => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            _ => false,
        }
    }

    /// Forget the last tick so the next call fires immediately.
    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }

    /// Target interval in milliseconds.
    pub fn interval_ms(&self) -> u64 {
        self.target_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_secs_conversion() {
        assert!((ms_to_secs(1_500) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_rate_controller() {
        let mut ctrl = RateController::new(60);
        assert_eq!(ctrl.interval_ms(), 16);
        assert!(ctrl.should_tick(0)); // first tick always fires
        assert!(!ctrl.should_tick(1)); // 1ms later, too soon
        assert!(ctrl.should_tick(17));
    }

    #[test]
    fn test_rate_controller_reset() {
        let mut ctrl = RateController::new(10);
        assert!(ctrl.should_tick(0));
        assert!(!ctrl.should_tick(5));
        ctrl.reset();
        assert!(ctrl.should_tick(5));
    }
}
