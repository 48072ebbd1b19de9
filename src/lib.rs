use wasm_bindgen::prelude::*;

pub mod error;
pub mod math;
pub mod sampling;
pub mod data;
pub mod layout;
pub mod animation;
pub mod render;
pub mod scene;

pub use error::{LayoutError, SceneError};
pub use scene::Scene;

use animation::{GroupId, MorphTarget};
use data::{KindProfile, SceneConfig};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
}

/// Instanced groups whose buffers the renderer uploads
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstancedGroup {
    GiftBoxes = 0,
    Baubles = 1,
    MicroLights = 2,
    Ribbon = 3,
}

impl From<InstancedGroup> for GroupId {
    fn from(group: InstancedGroup) -> Self {
        match group {
            InstancedGroup::GiftBoxes => GroupId::GiftBoxes,
            InstancedGroup::Baubles => GroupId::Baubles,
            InstancedGroup::MicroLights => GroupId::MicroLights,
            InstancedGroup::Ribbon => GroupId::Ribbon,
        }
    }
}

/// Scene state exposed to JavaScript
#[wasm_bindgen]
pub struct TreeScene {
    scene: Scene,
}

#[wasm_bindgen]
impl TreeScene {
    /// Create a scene with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TreeScene, JsValue> {
        Self::build(SceneConfig::default())
    }

    /// Create a scene from a YAML configuration; missing keys use defaults
    #[wasm_bindgen]
    pub fn with_config(yaml: &str) -> Result<TreeScene, JsValue> {
        let config = SceneConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config)
    }

    fn build(config: SceneConfig) -> Result<TreeScene, JsValue> {
        let seed = config.seed.unwrap_or_else(random_seed);
        let mut scene = Scene::from_seed(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(window) = web_sys::window() {
            scene.set_device_pixel_ratio(window.device_pixel_ratio());
        }
        Ok(Self { scene })
    }

    /// Select the relaxation target
    #[wasm_bindgen]
    pub fn set_assembled(&mut self, assembled: bool) {
        let target = if assembled { MorphTarget::Assembled } else { MorphTarget::Scattered };
        self.scene.set_target(target);
    }

    /// Flip the mode; returns true when now heading to the tree
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.scene.toggle() == MorphTarget::Assembled
    }

    #[wasm_bindgen]
    pub fn is_assembled(&self) -> bool {
        self.scene.target() == MorphTarget::Assembled
    }

    /// Advance one frame and recompute all outputs
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.scene.advance(dt);
    }

    #[wasm_bindgen]
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.scene.set_device_pixel_ratio(dpr);
    }

    // === Instanced groups ===

    #[wasm_bindgen]
    pub fn instance_count(&self, group: InstancedGroup) -> usize {
        self.scene.instances(group.into()).map_or(0, |b| b.len())
    }

    /// Column-major matrices, 16 floats per instance
    #[wasm_bindgen]
    pub fn instance_matrices(&self, group: InstancedGroup) -> Vec<f32> {
        self.scene
            .instances(group.into())
            .map(|b| b.matrix_data().to_vec())
            .unwrap_or_default()
    }

    /// Linear RGB, 3 floats per instance, unclamped
    #[wasm_bindgen]
    pub fn instance_colors(&self, group: InstancedGroup) -> Vec<f32> {
        self.scene
            .instances(group.into())
            .map(|b| b.color_data().to_vec())
            .unwrap_or_default()
    }

    /// True once per recomputed frame
    #[wasm_bindgen]
    pub fn take_instances_dirty(&mut self, group: InstancedGroup) -> bool {
        self.scene
            .instances_mut(group.into())
            .is_some_and(|b| b.take_dirty())
    }

    // === Foliage point cloud ===

    #[wasm_bindgen]
    pub fn foliage_count(&self) -> usize {
        self.scene.foliage_attributes().count()
    }

    #[wasm_bindgen]
    pub fn foliage_scatter_positions(&self) -> Vec<f32> {
        self.scene.foliage_attributes().scatter_positions.clone()
    }

    #[wasm_bindgen]
    pub fn foliage_tree_positions(&self) -> Vec<f32> {
        self.scene.foliage_attributes().tree_positions.clone()
    }

    #[wasm_bindgen]
    pub fn foliage_randoms(&self) -> Vec<f32> {
        self.scene.foliage_attributes().randoms.clone()
    }

    /// Raw morph ratio for `uRatio`; the shader eases it
    #[wasm_bindgen]
    pub fn foliage_ratio(&self) -> f32 {
        self.scene.foliage_uniforms().ratio
    }

    #[wasm_bindgen]
    pub fn time(&self) -> f32 {
        self.scene.foliage_uniforms().time
    }

    #[wasm_bindgen]
    pub fn pixel_ratio(&self) -> f32 {
        self.scene.foliage_uniforms().pixel_ratio
    }

    #[wasm_bindgen]
    pub fn settle_threshold(&self) -> f32 {
        self.scene.foliage_uniforms().settle
    }

    #[wasm_bindgen]
    pub fn tree_height(&self) -> f32 {
        self.scene.config().tree_height
    }

    /// Cone radius the foliage sits on, for `uTreeRadius`
    #[wasm_bindgen]
    pub fn foliage_radius(&self) -> f32 {
        let config = self.scene.config();
        config.tree_radius_base * config.foliage_radius_scale
    }

    #[wasm_bindgen]
    pub fn foliage_vertex_shader() -> String {
        render::shaders::FOLIAGE_VERTEX_SHADER.to_string()
    }

    #[wasm_bindgen]
    pub fn foliage_fragment_shader() -> String {
        render::shaders::FOLIAGE_FRAGMENT_SHADER.to_string()
    }

    /// Linear base colour for the foliage `uColor` uniform
    #[wasm_bindgen]
    pub fn foliage_color() -> Vec<f32> {
        foliage_base_color().to_array().to_vec()
    }

    // === Instanced shading and bloom ===

    #[wasm_bindgen]
    pub fn instanced_vertex_shader() -> String {
        render::shaders::INSTANCED_VERTEX_SHADER.to_string()
    }

    /// Must render into a float target; instance colours are unclamped
    #[wasm_bindgen]
    pub fn instanced_fragment_shader() -> String {
        render::shaders::INSTANCED_FRAGMENT_SHADER.to_string()
    }

    #[wasm_bindgen]
    pub fn bloom_extract_shader() -> String {
        render::shaders::BLOOM_EXTRACT_SHADER.to_string()
    }

    /// `u_threshold` of the bloom bright-pass
    #[wasm_bindgen]
    pub fn bloom_threshold() -> f32 {
        render::BLOOM_THRESHOLD
    }

    /// `u_knee` of the bloom bright-pass
    #[wasm_bindgen]
    pub fn bloom_knee() -> f32 {
        render::BLOOM_KNEE
    }

    // === Star ===

    #[wasm_bindgen]
    pub fn star_matrix(&self) -> Vec<f32> {
        self.scene.star().transform.to_matrix().as_slice().to_vec()
    }

    #[wasm_bindgen]
    pub fn star_color(&self) -> Vec<f32> {
        self.scene.star().color.to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn star_light_intensity(&self) -> f32 {
        self.scene.star().light_intensity
    }

    #[wasm_bindgen]
    pub fn star_emissive_intensity(&self) -> f32 {
        self.scene.star().emissive_intensity
    }

    // === Tree core and scene ===

    #[wasm_bindgen]
    pub fn core_opacity(&self) -> f32 {
        self.scene.engine().core_opacity()
    }

    #[wasm_bindgen]
    pub fn core_visible(&self) -> bool {
        self.scene.engine().core_visible()
    }

    #[wasm_bindgen]
    pub fn core_radius(&self) -> f32 {
        self.scene.config().core_radius()
    }

    /// Whole-scene yaw in radians
    #[wasm_bindgen]
    pub fn scene_sway(&self) -> f32 {
        self.scene.engine().scene_sway()
    }

    #[wasm_bindgen]
    pub fn auto_rotate(&self) -> bool {
        self.scene.engine().auto_rotate()
    }

    /// Per-kind scale band, rotation band, palette and bloom flag as YAML
    #[wasm_bindgen]
    pub fn material_profiles() -> Result<String, JsValue> {
        material_profiles_yaml().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn material_profiles_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&KindProfile::all())
}

fn foliage_base_color() -> math::Color {
    KindProfile::for_kind(data::ElementKind::FoliageParticle).palette[0].value.to_linear()
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}
