use serde::{Deserialize, Serialize};
use crate::error::{LayoutError, SceneError, check_dimension, check_rate, check_unit_fraction};

/// Element counts per group; fixed for the lifetime of a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Populations {
    pub foliage: usize,
    pub gift_boxes: usize,
    pub baubles: usize,
    pub micro_lights: usize,
    pub ribbon_segments: usize,
}

impl Default for Populations {
    fn default() -> Self {
        Self {
            foliage: 4000,
            gift_boxes: 120,
            baubles: 1200,
            micro_lights: 300,
            ribbon_segments: 600,
        }
    }
}

/// Per-group relaxation rates (1/s) of the morph state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachRates {
    pub foliage: f32,
    pub ornaments: f32,
    pub ribbon: f32,
    /// Slower than the ornaments so the star arrives last
    pub star: f32,
    pub core_in: f32,
    pub core_out: f32,
}

impl Default for ApproachRates {
    fn default() -> Self {
        Self {
            foliage: 0.8,
            ornaments: 1.0,
            ribbon: 1.0,
            star: 0.8,
            core_in: 0.8,
            core_out: 2.5,
        }
    }
}

/// Tunables of the whole scene, loadable from YAML.
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree_height: f32,
    pub tree_radius_base: f32,
    pub scatter_radius: f32,
    /// Foliage sits on a slightly wider cone than the ornaments
    pub foliage_radius_scale: f32,
    /// Translucent core cone, kept inside the ornament shell
    pub core_radius_scale: f32,
    pub ribbon_windings: f32,
    pub ribbon_offset: f32,
    /// Height of the star above the cone apex
    pub star_apex_offset: f32,
    /// Extra lift keeping the scattered star above the cloud centre
    pub star_scatter_lift: f32,
    /// Eased ratio above which a group counts as settled
    pub settle_threshold: f32,
    pub populations: Populations,
    pub rates: ApproachRates,
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_height: 12.0,
            tree_radius_base: 4.5,
            scatter_radius: 15.0,
            foliage_radius_scale: 1.05,
            core_radius_scale: 0.85,
            ribbon_windings: 6.5,
            ribbon_offset: 0.3,
            star_apex_offset: 0.6,
            star_scatter_lift: 5.0,
            settle_threshold: 0.9,
            populations: Populations::default(),
            rates: ApproachRates::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        check_dimension("tree_height", self.tree_height)?;
        check_dimension("tree_radius_base", self.tree_radius_base)?;
        check_dimension("scatter_radius", self.scatter_radius)?;
        check_dimension("foliage_radius_scale", self.foliage_radius_scale)?;
        check_dimension("core_radius_scale", self.core_radius_scale)?;
        check_dimension("ribbon_windings", self.ribbon_windings)?;
        check_dimension("ribbon_offset", self.ribbon_offset)?;
        check_dimension("star_apex_offset", self.star_apex_offset)?;
        check_dimension("star_scatter_lift", self.star_scatter_lift)?;
        check_unit_fraction("settle_threshold", self.settle_threshold)?;

        let r = &self.rates;
        for (name, rate) in [
            ("rates.foliage", r.foliage),
            ("rates.ornaments", r.ornaments),
            ("rates.ribbon", r.ribbon),
            ("rates.star", r.star),
            ("rates.core_in", r.core_in),
            ("rates.core_out", r.core_out),
        ] {
            check_rate(name, rate)?;
        }
        Ok(())
    }

    /// Radius of the translucent core cone at its base
    pub fn core_radius(&self) -> f32 {
        self.tree_radius_base * self.core_radius_scale
    }
}
