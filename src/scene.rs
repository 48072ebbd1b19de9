//! A mounted scene: immutable layout, engine state and per-frame outputs

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use crate::animation::{GroupId, MorphEngine, MorphTarget, StarOutput};
use crate::data::SceneConfig;
use crate::error::LayoutError;
use crate::layout::{FoliageAttributes, SceneLayout};
use crate::render::{FoliageUniforms, InstanceBuffer, pixel_ratio_hint};

pub struct Scene {
    config: SceneConfig,
    layout: SceneLayout,
    engine: MorphEngine,
    /// Boxes, baubles, micro-lights
    ornament_buffers: [InstanceBuffer; 3],
    ribbon_buffer: InstanceBuffer,
    foliage_attributes: FoliageAttributes,
    foliage_uniforms: FoliageUniforms,
    star: StarOutput,
    pixel_ratio: f32,
}

impl Scene {
    /// Generate the layout once and prime every output buffer
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, LayoutError> {
        config.validate()?;
        let layout = SceneLayout::generate(&config, rng)?;
        let engine = MorphEngine::new(&config);

        let ornament_buffers = [
            InstanceBuffer::new(layout.ornaments.gift_boxes.len()),
            InstanceBuffer::new(layout.ornaments.baubles.len()),
            InstanceBuffer::new(layout.ornaments.micro_lights.len()),
        ];
        let ribbon_buffer = InstanceBuffer::new(layout.ribbon.len());
        let foliage_attributes = FoliageAttributes::from_records(&layout.foliage);
        let star = engine.update_star(&layout.star);

        let mut scene = Self {
            config,
            layout,
            engine,
            ornament_buffers,
            ribbon_buffer,
            foliage_attributes,
            foliage_uniforms: FoliageUniforms::default(),
            star,
            pixel_ratio: 1.0,
        };
        scene.refresh();
        Ok(scene)
    }

    /// Seeded from `config.seed` when present, otherwise from `fallback_seed`
    pub fn from_seed(config: SceneConfig, fallback_seed: u64) -> Result<Self, LayoutError> {
        let seed = config.seed.unwrap_or(fallback_seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    /// One frame: advance rolling state, then recompute every output
    pub fn advance(&mut self, dt: f32) {
        self.engine.tick(dt);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.engine.update_ornaments(&self.layout.ornaments, &mut self.ornament_buffers);
        self.engine.update_ribbon(&self.layout.ribbon, &mut self.ribbon_buffer);
        self.star = self.engine.update_star(&self.layout.star);
        self.foliage_uniforms = self.engine.update_foliage(self.pixel_ratio);
    }

    pub fn set_target(&mut self, target: MorphTarget) {
        self.engine.set_target(target);
    }

    pub fn toggle(&mut self) -> MorphTarget {
        self.engine.toggle()
    }

    pub fn target(&self) -> MorphTarget {
        self.engine.target()
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.pixel_ratio = pixel_ratio_hint(dpr);
        self.foliage_uniforms.pixel_ratio = self.pixel_ratio;
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    /// Instance buffer of an instanced group; foliage and star have none
    pub fn instances(&self, group: GroupId) -> Option<&InstanceBuffer> {
        match group {
            GroupId::GiftBoxes => Some(&self.ornament_buffers[0]),
            GroupId::Baubles => Some(&self.ornament_buffers[1]),
            GroupId::MicroLights => Some(&self.ornament_buffers[2]),
            GroupId::Ribbon => Some(&self.ribbon_buffer),
            GroupId::Foliage | GroupId::Star => None,
        }
    }

    pub fn instances_mut(&mut self, group: GroupId) -> Option<&mut InstanceBuffer> {
        match group {
            GroupId::GiftBoxes => Some(&mut self.ornament_buffers[0]),
            GroupId::Baubles => Some(&mut self.ornament_buffers[1]),
            GroupId::MicroLights => Some(&mut self.ornament_buffers[2]),
            GroupId::Ribbon => Some(&mut self.ribbon_buffer),
            GroupId::Foliage | GroupId::Star => None,
        }
    }

    pub fn foliage_attributes(&self) -> &FoliageAttributes {
        &self.foliage_attributes
    }

    pub fn foliage_uniforms(&self) -> &FoliageUniforms {
        &self.foliage_uniforms
    }

    pub fn star(&self) -> &StarOutput {
        &self.star
    }
}
