use rand::Rng;
use serde::Serialize;
use crate::error::{LayoutError, check_dimension};

/// One entry of a weighted table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f32,
}

impl<T> Weighted<T> {
    pub const fn new(value: T, weight: f32) -> Self {
        Self { value, weight }
    }
}

/// Draw one value from `table` with probability proportional to its weight.
/// Entries with non-positive or non-finite weight are never chosen.
pub fn choose_weighted<'a, T, R: Rng + ?Sized>(
    table: &'a [Weighted<T>],
    rng: &mut R,
) -> Result<&'a T, LayoutError> {
    let usable = |w: f32| w.is_finite() && w > 0.0;
    let total: f32 = table.iter().map(|e| e.weight).filter(|w| usable(*w)).sum();
    if total <= 0.0 {
        return Err(LayoutError::EmptyPalette);
    }

    let mut choice = rng.random::<f32>() * total;
    let mut last = None;
    for entry in table.iter().filter(|e| usable(e.weight)) {
        choice -= entry.weight;
        last = Some(&entry.value);
        if choice < 0.0 {
            return Ok(&entry.value);
        }
    }

    // Float round-off can leave a sliver past the last entry
    last.ok_or(LayoutError::EmptyPalette)
}

/// Closed scalar interval used for per-kind random attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A band that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Scale bands must be non-negative and ordered
    pub fn validate_scale(&self) -> Result<(), LayoutError> {
        let invalid = LayoutError::InvalidBand { min: self.min, max: self.max };
        check_dimension("band minimum", self.min).map_err(|_| invalid.clone())?;
        check_dimension("band maximum", self.max).map_err(|_| invalid.clone())?;
        if self.min > self.max {
            return Err(invalid);
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_weighted_frequencies() {
        let table = [
            Weighted::new('a', 0.2),
            Weighted::new('b', 0.3),
            Weighted::new('c', 0.5),
        ];
        let mut rng = SmallRng::seed_from_u64(1);
        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match choose_weighted(&table, &mut rng).unwrap() {
                'a' => counts[0] += 1,
                'b' => counts[1] += 1,
                _ => counts[2] += 1,
            }
        }
        for (count, expected) in counts.iter().zip([0.2, 0.3, 0.5]) {
            let freq = *count as f32 / n as f32;
            assert!((freq - expected).abs() < 0.02, "freq {} expected {}", freq, expected);
        }
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let table = [Weighted::new(1, 0.0), Weighted::new(2, 1.0), Weighted::new(3, -4.0)];
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..1_000 {
            assert_eq!(*choose_weighted(&table, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_empty_table_is_error() {
        let mut rng = SmallRng::seed_from_u64(3);
        let empty: [Weighted<u8>; 0] = [];
        assert_eq!(choose_weighted(&empty, &mut rng), Err(LayoutError::EmptyPalette));
        let zeros = [Weighted::new(0u8, 0.0)];
        assert_eq!(choose_weighted(&zeros, &mut rng), Err(LayoutError::EmptyPalette));
    }

    #[test]
    fn test_band_sample_in_range() {
        let band = Band::new(0.08, 0.16);
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..1_000 {
            assert!(band.contains(band.sample(&mut rng)));
        }
        assert_eq!(Band::fixed(0.08).sample(&mut rng), 0.08);
    }

    #[test]
    fn test_band_validation() {
        assert!(Band::new(0.1, 0.2).validate_scale().is_ok());
        assert!(Band::new(0.2, 0.1).validate_scale().is_err());
        assert!(Band::new(-0.1, 0.2).validate_scale().is_err());
        assert!(Band::new(0.1, f32::NAN).validate_scale().is_err());
    }
}
