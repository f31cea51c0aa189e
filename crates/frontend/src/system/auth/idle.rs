//! Inactivity timeout. Time is passed in (milliseconds) so the rules are
//! independent of the browser clock.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleTracker {
    timeout_ms: f64,
    last_activity_ms: f64,
}

impl IdleTracker {
    pub fn new(timeout_ms: f64, now_ms: f64) -> Self {
        Self {
            timeout_ms,
            last_activity_ms: now_ms,
        }
    }

    /// Mouse, keyboard, scroll or click activity.
    pub fn touch(&mut self, now_ms: f64) {
        if now_ms > self.last_activity_ms {
            self.last_activity_ms = now_ms;
        }
    }

    pub fn is_idle(&self, now_ms: f64) -> bool {
        now_ms - self.last_activity_ms >= self.timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MINUTES: f64 = 600_000.0;

    #[test]
    fn test_expires_after_timeout() {
        let tracker = IdleTracker::new(TEN_MINUTES, 1_000.0);
        assert!(!tracker.is_idle(1_000.0 + TEN_MINUTES - 1.0));
        assert!(tracker.is_idle(1_000.0 + TEN_MINUTES));
    }

    #[test]
    fn test_activity_extends() {
        let mut tracker = IdleTracker::new(TEN_MINUTES, 0.0);
        tracker.touch(500_000.0);
        assert!(!tracker.is_idle(TEN_MINUTES));
        assert!(!tracker.is_idle(500_000.0 + TEN_MINUTES - 1.0));
        assert!(tracker.is_idle(500_000.0 + TEN_MINUTES));
    }

    #[test]
    fn test_out_of_order_touch_is_ignored() {
        let mut tracker = IdleTracker::new(TEN_MINUTES, 100.0);
        tracker.touch(50.0);
        assert!(tracker.is_idle(100.0 + TEN_MINUTES));
    }
}
