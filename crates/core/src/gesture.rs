//! Hidden configuration entry point: the activation-gesture detector.
//!
//! An unattended display has no visible chrome, so the configuration
//! modal opens after five quick gestures (clicks/taps) on the screen.
//! Each gesture must land within a fixed inactivity window of the
//! previous one; a pause resets the count.
//!
//! The window is enforced by comparing timestamps at registration time
//! rather than arming a reset timer per gesture: a gesture arriving after
//! the deadline simply restarts the count at 1, which is observably the
//! same and leaves no timer to cancel on teardown.

use std::time::{Duration, Instant};

/// Gestures required to trip configuration mode.
pub const ACTIVATION_GESTURES: u8 = 5;

/// Inactivity window; a gesture later than this after the previous one
/// restarts the count.
pub const ACTIVATION_WINDOW: Duration = Duration::from_secs(2);

/// Counts activation gestures against an inactivity deadline.
#[derive(Debug)]
pub struct ActivationDetector {
    required: u8,
    window: Duration,
    count: u8,
    deadline: Option<Instant>,
}

impl ActivationDetector {
    pub fn new(required: u8, window: Duration) -> Self {
        Self {
            required,
            window,
            count: 0,
            deadline: None,
        }
    }

    /// Register one gesture at `now`.
    ///
    /// Returns `true` when this gesture is the one that trips activation;
    /// the detector resets itself in that case.
    pub fn register(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now <= deadline => self.count += 1,
            _ => self.count = 1,
        }
        self.deadline = Some(now + self.window);

        if self.count >= self.required {
            self.reset();
            return true;
        }
        false
    }

    /// Current consecutive-gesture count (for surfaces that show progress).
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Forget any partial gesture sequence.
    pub fn reset(&mut self) {
        self.count = 0;
        self.deadline = None;
    }
}

impl Default for ActivationDetector {
    fn default() -> Self {
        Self::new(ACTIVATION_GESTURES, ACTIVATION_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(detector: &mut ActivationDetector, start: Instant, n: u8) -> bool {
        let mut tripped = false;
        for i in 0..n {
            tripped = detector.register(start + Duration::from_millis(100 * i as u64));
        }
        tripped
    }

    #[test]
    fn five_quick_gestures_activate() {
        let mut detector = ActivationDetector::default();
        assert!(quick(&mut detector, Instant::now(), 5));
    }

    #[test]
    fn four_gestures_do_not_activate() {
        let mut detector = ActivationDetector::default();
        assert!(!quick(&mut detector, Instant::now(), 4));
        assert_eq!(detector.count(), 4);
    }

    #[test]
    fn stale_gestures_never_accumulate() {
        // 3 quick gestures, a pause past the window, then 3 more: the
        // stale count must not carry over into the second burst.
        let mut detector = ActivationDetector::default();
        let start = Instant::now();
        assert!(!quick(&mut detector, start, 3));

        let later = start + Duration::from_millis(300) + ACTIVATION_WINDOW + Duration::from_millis(1);
        assert!(!quick(&mut detector, later, 3));
        assert_eq!(detector.count(), 3);
    }

    #[test]
    fn each_gesture_extends_the_window() {
        // Gestures spaced just inside the window keep the sequence alive
        // even though the total span exceeds one window.
        let mut detector = ActivationDetector::default();
        let start = Instant::now();
        let step = ACTIVATION_WINDOW - Duration::from_millis(1);

        let mut tripped = false;
        for i in 0..5u32 {
            tripped = detector.register(start + step * i);
        }
        assert!(tripped);
    }

    #[test]
    fn detector_resets_after_activation() {
        let mut detector = ActivationDetector::default();
        let start = Instant::now();
        assert!(quick(&mut detector, start, 5));
        assert_eq!(detector.count(), 0);

        // A fresh burst is needed to activate again.
        assert!(!quick(&mut detector, start + Duration::from_secs(10), 4));
    }

    #[test]
    fn reset_forgets_partial_sequence() {
        let mut detector = ActivationDetector::default();
        let start = Instant::now();
        quick(&mut detector, start, 4);
        detector.reset();
        assert!(!detector.register(start + Duration::from_millis(500)));
        assert_eq!(detector.count(), 1);
    }
}
