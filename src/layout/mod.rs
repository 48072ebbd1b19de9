//! Layout generation for every visual group
//!
//! Runs once per scene. Each element gets an independent scatter-cloud
//! position and tree-silhouette position plus its static attributes; the
//! result is never regenerated, so the morph keeps its visual identity.

mod generator;
mod foliage;

pub use generator::{
    OrnamentGroups, generate_tier, generate_gift_boxes, generate_baubles,
    generate_micro_lights, generate_ornaments, generate_ribbon, generate_star,
};
pub use foliage::{
    FoliageAttributes, generate_foliage, foliage_color, HIGHLIGHT_THRESHOLD, HIGHLIGHT_MIX,
};

use rand::Rng;
use crate::data::{ElementRecord, SceneConfig};
use crate::error::LayoutError;

/// All element records of a scene instance
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub foliage: Vec<ElementRecord>,
    pub ornaments: OrnamentGroups,
    pub ribbon: Vec<ElementRecord>,
    pub star: ElementRecord,
}

impl SceneLayout {
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, LayoutError> {
        config.validate()?;

        let layout = Self {
            foliage: generate_foliage(config, rng)?,
            ornaments: generate_ornaments(config, rng)?,
            ribbon: generate_ribbon(config, rng)?,
            star: generate_star(config, rng)?,
        };

        log::info!(
            "Generated layout: {} foliage, {} boxes, {} baubles, {} micro-lights, {} ribbon segments",
            layout.foliage.len(),
            layout.ornaments.gift_boxes.len(),
            layout.ornaments.baubles.len(),
            layout.ornaments.micro_lights.len(),
            layout.ribbon.len(),
        );

        Ok(layout)
    }

    /// Total number of animated elements
    pub fn element_count(&self) -> usize {
        self.foliage.len()
            + self.ornaments.gift_boxes.len()
            + self.ornaments.baubles.len()
            + self.ornaments.micro_lights.len()
            + self.ribbon.len()
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_full_layout() {
        let layout = SceneLayout::generate(&SceneConfig::default(), &mut SmallRng::seed_from_u64(8)).unwrap();
        assert_eq!(layout.element_count(), 4000 + 120 + 1200 + 300 + 600 + 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = SceneConfig::default();
        let a = SceneLayout::generate(&config, &mut SmallRng::seed_from_u64(99)).unwrap();
        let b = SceneLayout::generate(&config, &mut SmallRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_positions_drawn_independently() {
        let layout = SceneLayout::generate(&SceneConfig::default(), &mut SmallRng::seed_from_u64(5)).unwrap();
        let identical = layout
            .ornaments
            .baubles
            .iter()
            .filter(|b| b.scatter_position == b.tree_position)
            .count();
        assert_eq!(identical, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SceneConfig { scatter_radius: f32::NAN, ..Default::default() };
        assert!(SceneLayout::generate(&config, &mut SmallRng::seed_from_u64(1)).is_err());
    }
}
