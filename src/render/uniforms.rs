//! Scalar uniforms of the foliage point shader

/// Upper bound of the device pixel ratio used for point sizing
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Per-frame uniforms of the foliage point system.
/// `ratio` is the raw morph ratio; the shader applies the ease itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageUniforms {
    pub ratio: f32,
    pub time: f32,
    pub pixel_ratio: f32,
    /// Eased ratio above which the shader switches to settled motion
    pub settle: f32,
}

impl Default for FoliageUniforms {
    fn default() -> Self {
        Self { ratio: 0.0, time: 0.0, pixel_ratio: 1.0, settle: 0.9 }
    }
}

/// Size hint derived from the device pixel ratio, capped at 2
pub fn pixel_ratio_hint(device_pixel_ratio: f64) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        (device_pixel_ratio as f32).min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_capped() {
        assert_eq!(pixel_ratio_hint(1.0), 1.0);
        assert_eq!(pixel_ratio_hint(1.5), 1.5);
        assert_eq!(pixel_ratio_hint(3.0), 2.0);
    }

    #[test]
    fn test_pixel_ratio_guards() {
        assert_eq!(pixel_ratio_hint(0.0), 1.0);
        assert_eq!(pixel_ratio_hint(-2.0), 1.0);
        assert_eq!(pixel_ratio_hint(f64::NAN), 1.0);
    }
}
