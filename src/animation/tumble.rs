//! Group-level rotation accumulator
//!
//! While a group drifts its elements tumble at constant angular rates;
//! once it settles the accumulated angle relaxes back to zero. The clock
//! only stores the angle at the last phase change and when that happened,
//! so every element's rotation stays a pure function of time.

use crate::math::{Vec3, wrap_angle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleClock {
    /// Angular rates (rad/s) per Euler axis while drifting
    rates: Vec3,
    /// Relaxation rate (1/s) toward zero once settled
    damping: f32,
    anchor: Vec3,
    since: f32,
    settled: bool,
}

impl TumbleClock {
    pub fn new(rates: Vec3, damping: f32) -> Self {
        Self {
            rates,
            damping,
            anchor: Vec3::ZERO,
            since: 0.0,
            settled: false,
        }
    }

    /// A clock that never rotates
    pub fn still() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }

    /// Euler angles at `time`
    pub fn angles(&self, time: f32) -> Vec3 {
        let elapsed = (time - self.since).max(0.0);
        if self.settled {
            self.anchor.scale((-self.damping * elapsed).exp())
        } else {
            self.anchor + self.rates.scale(elapsed)
        }
    }

    /// Switch phase if the group crossed the settle threshold.
    /// Returns true on a transition.
    pub fn sync(&mut self, time: f32, settled: bool) -> bool {
        if settled == self.settled {
            return false;
        }
        let current = self.angles(time);
        self.anchor = Vec3::new(wrap_angle(current.x), wrap_angle(current.y), wrap_angle(current.z));
        self.since = time;
        self.settled = settled;
        true
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drifting_accumulates() {
        let clock = TumbleClock::new(Vec3::new(1.0, 0.0, 1.0), 2.0);
        let a = clock.angles(2.0);
        assert!((a.x - 2.0).abs() < 1e-5);
        assert_eq!(a.y, 0.0);
        assert!((a.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_settling_is_continuous_and_decays() {
        let mut clock = TumbleClock::new(Vec3::new(0.5, 0.8, 0.0), 2.0);
        let before = clock.angles(1.5);
        assert!(clock.sync(1.5, true));
        let after = clock.angles(1.5);
        assert!(before.distance(&after) < 1e-4);

        let later = clock.angles(4.0);
        assert!(later.length() < after.length());
        assert!(clock.angles(30.0).length() < 1e-6);
    }

    #[test]
    fn test_sync_without_change_is_noop() {
        let mut clock = TumbleClock::new(Vec3::new(1.0, 1.0, 1.0), 2.0);
        let copy = clock;
        assert!(!clock.sync(5.0, false));
        assert_eq!(clock, copy);
    }

    #[test]
    fn test_resumes_from_residual_angle() {
        let mut clock = TumbleClock::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        clock.sync(1.0, true);
        let residual = clock.angles(1.2);
        clock.sync(1.2, false);
        assert!((clock.angles(1.2).x - residual.x).abs() < 1e-5);
        assert!(clock.angles(2.2).x > residual.x);
    }

    #[test]
    fn test_anchor_wrapped() {
        let mut clock = TumbleClock::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        clock.sync(100.0, true);
        assert!(clock.angles(100.0).x.abs() <= std::f32::consts::PI + 1e-5);
    }

    #[test]
    fn test_still_clock() {
        let clock = TumbleClock::still();
        assert_eq!(clock.angles(123.0), Vec3::ZERO);
    }
}
