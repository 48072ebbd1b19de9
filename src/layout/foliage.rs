//! Point-cloud foliage generation
//!
//! Foliage is drawn as a point cloud whose per-vertex blend runs on the
//! GPU, so besides the element records this module also flattens the
//! group into the vertex attribute arrays the renderer uploads once.

use rand::Rng;
use crate::data::{ElementKind, ElementRecord, KindProfile, SceneConfig};
use crate::data::profile::FOLIAGE_HIGHLIGHT;
use crate::error::{LayoutError, check_dimension};
use crate::math::Color;
use crate::sampling::{sample_cone_lateral_surface, sample_sphere_volume};
use super::generator::check_loci;

/// Seed above which a particle gets the gold highlight
pub const HIGHLIGHT_THRESHOLD: f32 = 0.9;
/// Strength of the gold highlight mix
pub const HIGHLIGHT_MIX: f32 = 0.5;

pub fn generate_foliage<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Vec<ElementRecord>, LayoutError> {
    check_loci(config)?;
    let radius_scale = check_dimension("foliage_radius_scale", config.foliage_radius_scale)?;

    let profile = KindProfile::for_kind(ElementKind::FoliageParticle);
    let base_color = profile.palette[0].value.to_linear();
    let tree_radius = config.tree_radius_base * radius_scale;
    let count = config.populations.foliage;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let scatter = sample_sphere_volume(config.scatter_radius, rng);
        let tree = sample_cone_lateral_surface(config.tree_height, tree_radius, rng);

        records.push(
            ElementRecord::new(ElementKind::FoliageParticle, i)
                .with_positions(scatter, tree)
                .with_scale(profile.scale.min)
                .with_color(base_color)
                .with_seed(rng.random()),
        );
    }
    Ok(records)
}

/// Static colour of a foliage particle: base green, with a gold tint for
/// the top tenth of seeds
pub fn foliage_color(base: Color, seed: f32) -> Color {
    if seed > HIGHLIGHT_THRESHOLD {
        base.lerp(&FOLIAGE_HIGHLIGHT, HIGHLIGHT_MIX)
    } else {
        base
    }
}

/// Flat per-vertex attribute arrays for the point renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoliageAttributes {
    /// xyz per vertex
    pub scatter_positions: Vec<f32>,
    /// xyz per vertex
    pub tree_positions: Vec<f32>,
    /// one [0, 1) value per vertex
    pub randoms: Vec<f32>,
}

impl FoliageAttributes {
    pub fn from_records(records: &[ElementRecord]) -> Self {
        let mut attrs = Self {
            scatter_positions: Vec::with_capacity(records.len() * 3),
            tree_positions: Vec::with_capacity(records.len() * 3),
            randoms: Vec::with_capacity(records.len()),
        };

        for r in records {
            attrs.scatter_positions.extend_from_slice(&r.scatter_position.to_array());
            attrs.tree_positions.extend_from_slice(&r.tree_position.to_array());
            attrs.randoms.push(r.seed);
        }

        attrs
    }

    pub fn count(&self) -> usize {
        self.randoms.len()
    }
}
