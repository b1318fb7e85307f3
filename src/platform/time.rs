//! Frame-rate limiting
//!
//! The display clock fires at its native cadence (often 60-144 Hz). The pattern
//! only advances when at least `1000 / max_fps` milliseconds have passed since
//! the last accepted frame. Skipped frames do no work at all.

/// Slack for timestamps that land on an exact multiple of the interval but
/// lose an ulp in the subtraction
const INTERVAL_TOLERANCE_MS: f64 = 1e-6;

/// Gate for the frame callback
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    /// Minimum spacing between accepted frames (ms)
    min_interval_ms: f64,
    /// Timestamp of the last accepted frame
    last_accepted: Option<f64>,
    accepted: u64,
    skipped: u64,
}

impl FrameLimiter {
    /// A non-positive or non-finite `max_fps` disables the cap.
    pub fn new(max_fps: f64) -> Self {
        let min_interval_ms = if max_fps.is_finite() && max_fps > 0.0 {
            1000.0 / max_fps
        } else {
            0.0
        };
        Self {
            min_interval_ms,
            last_accepted: None,
            accepted: 0,
            skipped: 0,
        }
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// Decide whether the frame at `now_ms` should run. The first frame always does.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms - last + INTERVAL_TOLERANCE_MS < self.min_interval_ms {
                self.skipped += 1;
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        self.accepted += 1;
        true
    }

    /// Frames that ran
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Frames dropped by the cap
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_accepted() {
        let mut limiter = FrameLimiter::new(30.0);
        assert!(limiter.accept(12345.0));
        assert_eq!(limiter.accepted(), 1);
    }

    #[test]
    fn test_interval_gating() {
        let mut limiter = FrameLimiter::new(10.0);
        assert_eq!(limiter.min_interval_ms(), 100.0);

        assert!(limiter.accept(0.0));
        assert!(!limiter.accept(50.0));
        assert!(!limiter.accept(99.9));
        assert!(limiter.accept(100.0));
        // Interval is measured from the last accepted frame, not the last callback
        assert!(!limiter.accept(150.0));
        assert!(limiter.accept(260.0));

        assert_eq!(limiter.accepted(), 3);
        assert_eq!(limiter.skipped(), 3);
    }

    #[test]
    fn test_display_cadence_is_capped() {
        let mut limiter = FrameLimiter::new(30.0);
        // One second of a 120 Hz display
        let accepted = (0..120)
            .filter(|&i| limiter.accept(i as f64 * 1000.0 / 120.0))
            .count();
        assert_eq!(accepted, 30);
    }

    #[test]
    fn test_exact_interval_multiples_accepted() {
        let mut limiter = FrameLimiter::new(30.0);
        let interval = limiter.min_interval_ms();
        // 100 ms and 133.3 ms are produced by 120 Hz timestamps, not by summing intervals
        for k in 0..30 {
            let now_ms = (k * 4) as f64 * 1000.0 / 120.0;
            assert!(limiter.accept(now_ms), "frame {} at {} ms", k, now_ms);
        }
        assert!(!limiter.accept(29.0 * interval + interval / 2.0));
        assert_eq!(limiter.accepted(), 30);
        assert_eq!(limiter.skipped(), 1);
    }

    #[test]
    fn test_uncapped() {
        for max_fps in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let mut limiter = FrameLimiter::new(max_fps);
            assert_eq!(limiter.min_interval_ms(), 0.0);
            assert!(limiter.accept(1.0));
            assert!(limiter.accept(1.0));
        }
    }
}
