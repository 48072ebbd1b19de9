//! Easing functions for smooth animations

/// Easing function types
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation
    Linear,
    /// Cubic ease-in-out: slow departure, slow arrival (default for the morph)
    #[default]
    EaseInOutCubic,
}

/// Symmetric cubic ease, `4t^3` below one half and mirrored above
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    // NaN collapses to the start of the curve
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    match easing {
        Easing::Linear => t,
        Easing::EaseInOutCubic => ease_in_out_cubic(t),
    }
}
