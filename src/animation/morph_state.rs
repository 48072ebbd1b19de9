//! Scatter/assemble progress of a visual group
//!
//! A single scalar per group relaxes exponentially toward the binary
//! target. It starts fully scattered and never snaps.

use serde::{Deserialize, Serialize};
use super::easing::{Easing, ease};

/// Relaxation target chosen by the mode toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MorphTarget {
    #[default]
    Scattered,
    Assembled,
}

impl MorphTarget {
    pub fn value(&self) -> f32 {
        match self {
            MorphTarget::Scattered => 0.0,
            MorphTarget::Assembled => 1.0,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            MorphTarget::Scattered => MorphTarget::Assembled,
            MorphTarget::Assembled => MorphTarget::Scattered,
        }
    }
}

/// Progress of one group toward the tree configuration, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphState {
    ratio: f32,
    /// Rate (1/s) used while heading toward `Assembled`
    rate_in: f32,
    /// Rate (1/s) used while heading toward `Scattered`
    rate_out: f32,
    easing: Easing,
}

impl MorphState {
    /// Scattered state with the same rate in both directions
    pub fn new(rate: f32) -> Self {
        Self::with_rates(rate, rate)
    }

    pub fn with_rates(rate_in: f32, rate_out: f32) -> Self {
        Self {
            ratio: 0.0,
            rate_in: sanitize_rate(rate_in),
            rate_out: sanitize_rate(rate_out),
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Exponential step toward the target; `dt <= 0` is a no-op
    pub fn relax(&mut self, target: MorphTarget, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        let rate = match target {
            MorphTarget::Assembled => self.rate_in,
            MorphTarget::Scattered => self.rate_out,
        };
        let alpha = 1.0 - (-rate * dt).exp();
        self.ratio += (target.value() - self.ratio) * alpha;
        self.ratio = self.ratio.clamp(0.0, 1.0);
    }

    /// Raw relaxed progress
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Progress after easing; this is the blend factor
    pub fn eased(&self) -> f32 {
        ease(self.ratio, self.easing)
    }

    pub fn is_settled(&self, threshold: f32) -> bool {
        self.eased() > threshold
    }

    /// Force a ratio, e.g. to start a scene already assembled
    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    }
}

fn sanitize_rate(rate: f32) -> f32 {
    if rate.is_finite() && rate > 0.0 { rate } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_scattered() {
        let state = MorphState::new(1.0);
        assert_eq!(state.ratio(), 0.0);
        assert_eq!(state.eased(), 0.0);
    }

    #[test]
    fn test_monotone_convergence_to_assembled() {
        let mut state = MorphState::new(1.0);
        let mut prev = state.ratio();
        for _ in 0..2_000 {
            state.relax(MorphTarget::Assembled, 1.0 / 60.0);
            let r = state.ratio();
            assert!(r >= prev);
            assert!((0.0..=1.0).contains(&r));
            prev = r;
        }
        assert!(state.ratio() > 0.99);
    }

    #[test]
    fn test_first_step_matches_exponential_formula() {
        let mut state = MorphState::new(0.8);
        state.relax(MorphTarget::Assembled, 0.5);
        let expected = 1.0 - (-0.8f32 * 0.5).exp();
        assert!((state.ratio() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut state = MorphState::new(1.0);
        state.relax(MorphTarget::Assembled, 0.1);
        let before = state;
        state.relax(MorphTarget::Assembled, 0.0);
        assert_eq!(state, before);
        state.relax(MorphTarget::Assembled, -1.0);
        assert_eq!(state, before);
        state.relax(MorphTarget::Assembled, f32::NAN);
        assert_eq!(state, before);
    }

    #[test]
    fn test_large_dt_spike_stays_in_range() {
        let mut state = MorphState::new(1.0);
        state.relax(MorphTarget::Assembled, 1e9);
        assert_eq!(state.ratio(), 1.0);
        state.relax(MorphTarget::Scattered, f32::MAX);
        assert_eq!(state.ratio(), 0.0);
    }

    #[test]
    fn test_asymmetric_rates() {
        let mut slow_in = MorphState::with_rates(0.8, 2.5);
        slow_in.set_ratio(0.5);
        let mut copy = slow_in;
        slow_in.relax(MorphTarget::Assembled, 0.1);
        copy.relax(MorphTarget::Scattered, 0.1);
        let gained = slow_in.ratio() - 0.5;
        let lost = 0.5 - copy.ratio();
        assert!(lost > gained);
    }

    #[test]
    fn test_settled_uses_eased_ratio() {
        let mut state = MorphState::new(1.0);
        state.set_ratio(0.85);
        // ease(0.85) ~= 0.9831
        assert!(state.is_settled(0.9));
        state.set_ratio(0.7);
        assert!(!state.is_settled(0.9));
    }

    #[test]
    fn test_toggle() {
        assert_eq!(MorphTarget::Scattered.toggled(), MorphTarget::Assembled);
        assert_eq!(MorphTarget::Assembled.toggled(), MorphTarget::Scattered);
        assert_eq!(MorphTarget::default(), MorphTarget::Scattered);
    }
}
