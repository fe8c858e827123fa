//! Cancellable repeating countdown
//!
//! The round clock runs independently of frames. A host either forwards its
//! own wall-clock timer fires, or pumps elapsed seconds through [`Countdown::advance`].
//! Once cancelled, the handle swallows any late fires.

use serde::{Deserialize, Serialize};

/// Repeating timer handle owned by the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    /// Seconds between fires
    period: f32,
    /// Seconds accumulated toward the next fire
    elapsed: f32,
    active: bool,
}

impl Countdown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Arm the timer from zero
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Disarm the timer; pending partial periods are discarded
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Accumulate wall-clock seconds, returning how many periods completed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.active || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fires += 1;
        }
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_never_fires() {
        let mut timer = Countdown::new(1.0);
        assert_eq!(timer.advance(5.0), 0);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = Countdown::new(1.0);
        timer.start();
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.5), 1);
        assert_eq!(timer.advance(2.25), 2);
        assert_eq!(timer.advance(0.75), 1);
    }

    #[test]
    fn test_cancel_discards_partial_period() {
        let mut timer = Countdown::new(1.0);
        timer.start();
        timer.advance(0.9);
        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(timer.advance(0.2), 0);

        timer.start();
        assert_eq!(timer.advance(0.2), 0);
    }
}
