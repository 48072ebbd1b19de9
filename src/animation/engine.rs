//! Per-frame morph engine
//!
//! Owns the only rolling state of a scene: elapsed time, one morph state
//! and tumble clock per group, and the tree-core fade. Everything else is
//! recomputed each frame from the immutable element records through
//! [`animate_element`].

use crate::data::{ElementKind, ElementRecord, SceneConfig};
use crate::layout::OrnamentGroups;
use crate::math::{Color, Vec3, lerp};
use crate::render::{FoliageUniforms, InstanceBuffer};
use crate::sampling::cone_surface_normal;
use super::easing::{Easing, ease};
use super::morph_state::{MorphState, MorphTarget};
use super::motion::{MotionPhase, MotionRule, Transform, display_color};
use super::tumble::TumbleClock;

/// Damping (1/s) of the residual tumble once a group settles
const TUMBLE_DAMPING: f32 = 2.0;
/// Opacity below which the tree core is hidden
const CORE_VISIBLE_THRESHOLD: f32 = 0.01;

/// Visual groups with their own morph state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupId {
    Foliage,
    GiftBoxes,
    Baubles,
    MicroLights,
    Ribbon,
    Star,
}

impl GroupId {
    pub const ALL: [GroupId; 6] = [
        GroupId::Foliage,
        GroupId::GiftBoxes,
        GroupId::Baubles,
        GroupId::MicroLights,
        GroupId::Ribbon,
        GroupId::Star,
    ];

    pub fn kind(&self) -> ElementKind {
        match self {
            GroupId::Foliage => ElementKind::FoliageParticle,
            GroupId::GiftBoxes => ElementKind::GiftBox,
            GroupId::Baubles => ElementKind::Bauble,
            GroupId::MicroLights => ElementKind::MicroLight,
            GroupId::Ribbon => ElementKind::RibbonSegment,
            GroupId::Star => ElementKind::Star,
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }

    fn rate(&self, config: &SceneConfig) -> f32 {
        match self {
            GroupId::Foliage => config.rates.foliage,
            GroupId::GiftBoxes | GroupId::Baubles | GroupId::MicroLights => config.rates.ornaments,
            GroupId::Ribbon => config.rates.ribbon,
            GroupId::Star => config.rates.star,
        }
    }

    fn tumble_rates(&self) -> Vec3 {
        match self {
            GroupId::GiftBoxes | GroupId::Baubles => Vec3::new(1.0, 0.0, 1.0),
            GroupId::Star => Vec3::new(0.5, 0.8, 0.0),
            _ => Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GroupState {
    morph: MorphState,
    tumble: TumbleClock,
}

/// Read-only snapshot of one group for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupFrame {
    pub ratio: f32,
    pub eased: f32,
    pub settled: bool,
    pub time: f32,
    /// Group tumble angles applied to tumbling kinds
    pub tumble: Vec3,
}

/// Star transform plus its light parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarOutput {
    pub transform: Transform,
    pub color: Color,
    pub light_intensity: f32,
    pub emissive_intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphEngine {
    target: MorphTarget,
    /// Accumulated in f64 so long sessions do not drift
    time: f64,
    settle_threshold: f32,
    groups: [GroupState; 6],
    core: MorphState,
    tree_height: f32,
    foliage_radius: f32,
}

impl MorphEngine {
    pub fn new(config: &SceneConfig) -> Self {
        let groups = GroupId::ALL.map(|group| {
            let rates = group.tumble_rates();
            GroupState {
                morph: MorphState::new(group.rate(config)),
                tumble: if rates == Vec3::ZERO {
                    TumbleClock::still()
                } else {
                    TumbleClock::new(rates, TUMBLE_DAMPING)
                },
            }
        });

        Self {
            target: MorphTarget::Scattered,
            time: 0.0,
            settle_threshold: config.settle_threshold,
            groups,
            core: MorphState::with_rates(config.rates.core_in, config.rates.core_out)
                .with_easing(Easing::Linear),
            tree_height: config.tree_height,
            foliage_radius: config.tree_radius_base * config.foliage_radius_scale,
        }
    }

    pub fn target(&self) -> MorphTarget {
        self.target
    }

    pub fn set_target(&mut self, target: MorphTarget) {
        if target != self.target {
            log::debug!("Morph target {:?} -> {:?}", self.target, target);
            self.target = target;
        }
    }

    pub fn toggle(&mut self) -> MorphTarget {
        self.set_target(self.target.toggled());
        self.target
    }

    /// Elapsed scene time in seconds
    pub fn time(&self) -> f32 {
        self.time as f32
    }

    /// Advance all rolling state by one frame
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid frame delta {}", dt);
            0.0
        };
        if dt == 0.0 {
            return;
        }

        self.time += f64::from(dt);
        let now = self.time();
        for group in GroupId::ALL {
            let state = &mut self.groups[group.slot()];
            state.morph.relax(self.target, dt);
            let settled = state.morph.is_settled(self.settle_threshold);
            if state.tumble.sync(now, settled) {
                log::debug!(
                    "{:?} {} at t={:.2}",
                    group,
                    if settled { "settled" } else { "unsettled" },
                    now
                );
            }
        }
        self.core.relax(self.target, dt);
    }

    pub fn morph(&self, group: GroupId) -> &MorphState {
        &self.groups[group.slot()].morph
    }

    /// Snapshot used by the per-element update
    pub fn frame(&self, group: GroupId) -> GroupFrame {
        let state = &self.groups[group.slot()];
        let now = self.time();
        GroupFrame {
            ratio: state.morph.ratio(),
            eased: state.morph.eased(),
            settled: state.morph.is_settled(self.settle_threshold),
            time: now,
            tumble: state.tumble.angles(now),
        }
    }

    /// Write every record of a group into its instance buffer
    pub fn update_group(&self, group: GroupId, records: &[ElementRecord], buffer: &mut InstanceBuffer) {
        let frame = self.frame(group);
        for (i, record) in records.iter().enumerate() {
            let (transform, color) = animate_element(record, i, &frame);
            buffer.write(i, &transform, &color);
        }
        buffer.mark_dirty();
    }

    /// Boxes, baubles and micro-lights, each with its own state
    pub fn update_ornaments(&self, ornaments: &OrnamentGroups, buffers: &mut [InstanceBuffer; 3]) {
        let [boxes, baubles, micro] = buffers;
        self.update_group(GroupId::GiftBoxes, &ornaments.gift_boxes, boxes);
        self.update_group(GroupId::Baubles, &ornaments.baubles, baubles);
        self.update_group(GroupId::MicroLights, &ornaments.micro_lights, micro);
    }

    pub fn update_ribbon(&self, segments: &[ElementRecord], buffer: &mut InstanceBuffer) {
        self.update_group(GroupId::Ribbon, segments, buffer);
    }

    pub fn update_star(&self, star: &ElementRecord) -> StarOutput {
        let frame = self.frame(GroupId::Star);
        let (transform, color) = animate_element(star, 0, &frame);
        StarOutput {
            transform,
            color,
            light_intensity: lerp(0.5, 3.5, frame.eased),
            emissive_intensity: 1.0 + (frame.time * 2.5).sin() * 0.3,
        }
    }

    /// Foliage is blended on the GPU; only the uniforms change per frame
    pub fn update_foliage(&self, pixel_ratio: f32) -> FoliageUniforms {
        FoliageUniforms {
            ratio: self.morph(GroupId::Foliage).ratio(),
            time: self.time(),
            pixel_ratio,
            settle: self.settle_threshold,
        }
    }

    /// Opacity of the translucent tree core
    pub fn core_opacity(&self) -> f32 {
        self.core.ratio()
    }

    pub fn core_visible(&self) -> bool {
        self.core.ratio() > CORE_VISIBLE_THRESHOLD
    }

    /// Whole-scene yaw sway
    pub fn scene_sway(&self) -> f32 {
        let speed = match self.target {
            MorphTarget::Assembled => 0.05,
            MorphTarget::Scattered => 0.02,
        };
        (self.time() * speed).sin() * 0.15
    }

    /// Camera orbit spins on its own while scattered
    pub fn auto_rotate(&self) -> bool {
        self.target == MorphTarget::Scattered
    }

    /// CPU evaluation of the foliage vertex stage for one particle
    pub fn foliage_vertex(&self, record: &ElementRecord, uniforms: &FoliageUniforms) -> Vec3 {
        evaluate_foliage_vertex(
            record.scatter_position,
            record.tree_position,
            record.seed,
            uniforms,
            self.tree_height,
            self.foliage_radius,
        )
    }
}

/// Transform and colour of one element for the current frame.
/// A non-finite result falls back to the element's resting tree pose.
pub fn animate_element(record: &ElementRecord, index: usize, frame: &GroupFrame) -> (Transform, Color) {
    let phase = MotionPhase::new(index, record.seed, record.tree_position).with_spin(record.rotation_speed);
    let rotation = if record.kind.tumbles() { frame.tumble } else { Vec3::ZERO };
    let base = Transform::new(record.blended_position(frame.eased), rotation, record.scale);

    let moved = MotionRule::for_kind(record.kind).apply(base, &phase, frame.time, frame.settled);
    let transform = if moved.is_finite() {
        moved
    } else {
        Transform::new(record.tree_position, Vec3::ZERO, record.scale)
    };

    let color = display_color(record.kind, record.color, &phase, frame.time);
    let color = if color.is_finite() { color } else { record.color };

    (transform, color)
}

/// Mirror of the foliage vertex shader: ease, blend, then idle motion
pub fn evaluate_foliage_vertex(
    scatter: Vec3,
    tree: Vec3,
    random: f32,
    uniforms: &FoliageUniforms,
    tree_height: f32,
    tree_radius: f32,
) -> Vec3 {
    let t = ease(uniforms.ratio, Easing::EaseInOutCubic);
    let settled = t > uniforms.settle;
    let normal = cone_surface_normal(tree, tree_height, tree_radius);
    let phase = MotionPhase::new(0, random, tree).with_normal(normal);

    let base = Transform::new(scatter.lerp(&tree, t), Vec3::ZERO, 1.0);
    MotionRule::Breathe.apply(base, &phase, uniforms.time, settled).position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SceneLayout;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const DT: f32 = 1.0 / 60.0;

    fn layout() -> SceneLayout {
        SceneLayout::generate(&SceneConfig::default(), &mut SmallRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn test_starts_scattered() {
        let engine = MorphEngine::new(&SceneConfig::default());
        for group in GroupId::ALL {
            assert_eq!(engine.morph(group).ratio(), 0.0);
        }
        assert_eq!(engine.target(), MorphTarget::Scattered);
        assert!(!engine.core_visible());
    }

    #[test]
    fn test_long_scattered_run_stays_near_zero() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        for _ in 0..60 * 120 {
            engine.tick(DT);
            for group in GroupId::ALL {
                let r = engine.morph(group).ratio();
                assert!((0.0..=0.01).contains(&r));
            }
        }
    }

    #[test]
    fn test_toggle_moves_monotonically_without_overshoot() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        for _ in 0..120 {
            engine.tick(DT);
        }
        assert_eq!(engine.toggle(), MorphTarget::Assembled);

        let mut prev = GroupId::ALL.map(|g| engine.morph(g).ratio());
        for _ in 0..60 * 30 {
            engine.tick(DT);
            for (slot, group) in GroupId::ALL.iter().enumerate() {
                let r = engine.morph(*group).ratio();
                assert!(r >= prev[slot]);
                assert!(r <= 1.0);
                prev[slot] = r;
            }
        }
        assert!(engine.morph(GroupId::Baubles).ratio() > 0.99);
        assert!(engine.frame(GroupId::Baubles).settled);
    }

    #[test]
    fn test_star_arrives_after_ornaments() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        for _ in 0..90 {
            engine.tick(DT);
        }
        assert!(engine.morph(GroupId::Star).ratio() < engine.morph(GroupId::Baubles).ratio());
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        engine.tick(0.25);
        let before = engine.clone();

        engine.tick(0.0);
        engine.tick(-1.0);
        engine.tick(f32::NAN);
        engine.tick(f32::INFINITY);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_long_session_keeps_time_accurate() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        for _ in 0..604_800 {
            engine.tick(DT);
        }
        assert!((engine.time() - 10_080.0).abs() < 0.01, "{}", engine.time());
        assert_eq!(engine.frame(GroupId::Foliage).time, engine.time());
    }

    #[test]
    fn test_dt_spike_keeps_ratio_in_range() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        engine.tick(1e6);
        for group in GroupId::ALL {
            let r = engine.morph(group).ratio();
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_records_untouched_across_frames() {
        let layout = layout();
        let snapshot = layout.clone();
        let mut engine = MorphEngine::new(&SceneConfig::default());
        let mut buffers = [
            InstanceBuffer::new(layout.ornaments.gift_boxes.len()),
            InstanceBuffer::new(layout.ornaments.baubles.len()),
            InstanceBuffer::new(layout.ornaments.micro_lights.len()),
        ];
        let mut ribbon = InstanceBuffer::new(layout.ribbon.len());

        engine.set_target(MorphTarget::Assembled);
        for _ in 0..200 {
            engine.tick(DT);
            engine.update_ornaments(&layout.ornaments, &mut buffers);
            engine.update_ribbon(&layout.ribbon, &mut ribbon);
            engine.update_star(&layout.star);
        }
        assert_eq!(layout, snapshot);
        assert!(buffers.iter().all(|b| b.is_dirty()));
        assert!(ribbon.is_dirty());
    }

    #[test]
    fn test_scattered_frame_uses_scatter_positions() {
        let layout = layout();
        let engine = MorphEngine::new(&SceneConfig::default());
        let frame = engine.frame(GroupId::Baubles);
        let record = &layout.ornaments.baubles[7];
        let (transform, _) = animate_element(record, 7, &frame);
        assert!(transform.position.distance(&record.scatter_position) <= 0.03);
    }

    #[test]
    fn test_assembled_frame_rests_on_tree() {
        let layout = layout();
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        for _ in 0..60 * 30 {
            engine.tick(DT);
        }
        let frame = engine.frame(GroupId::GiftBoxes);
        for (i, record) in layout.ornaments.gift_boxes.iter().enumerate() {
            let (transform, color) = animate_element(record, i, &frame);
            assert!(transform.position.distance(&record.tree_position) < 0.05);
            assert_eq!(color, record.color);
        }
        // residual tumble has decayed
        assert!(frame.tumble.length() < 1e-3);
    }

    #[test]
    fn test_corrupted_element_falls_back_to_tree_pose() {
        let record = ElementRecord::new(ElementKind::Bauble, 0)
            .with_positions(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0))
            .with_scale(0.1);
        let frame = GroupFrame { ratio: 0.2, eased: 0.2, settled: false, time: 1.0, tumble: Vec3::ZERO };
        let (transform, _) = animate_element(&record, 0, &frame);
        assert_eq!(transform.position, record.tree_position);
        assert!(transform.is_finite());
    }

    #[test]
    fn test_core_fades_in_slowly_and_out_quickly() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        for _ in 0..60 {
            engine.tick(DT);
        }
        let gained = engine.core_opacity();
        assert!(engine.core_visible());

        engine.set_target(MorphTarget::Scattered);
        for _ in 0..60 {
            engine.tick(DT);
        }
        let lost = gained - engine.core_opacity();
        assert!(lost > gained * 0.8);
    }

    #[test]
    fn test_star_light_follows_ease() {
        let layout = layout();
        let mut engine = MorphEngine::new(&SceneConfig::default());
        assert!((engine.update_star(&layout.star).light_intensity - 0.5).abs() < 1e-6);

        engine.set_target(MorphTarget::Assembled);
        for _ in 0..60 * 40 {
            engine.tick(DT);
        }
        let star = engine.update_star(&layout.star);
        assert!((star.light_intensity - 3.5).abs() < 1e-3);
        assert!((0.7..=1.3).contains(&star.emissive_intensity));
    }

    #[test]
    fn test_scene_sway_and_auto_rotate() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        assert!(engine.auto_rotate());
        engine.tick(10.0);
        assert!((engine.scene_sway() - (0.2f32).sin() * 0.15).abs() < 1e-6);
        engine.toggle();
        assert!(!engine.auto_rotate());
    }

    #[test]
    fn test_foliage_uniforms_carry_raw_ratio() {
        let mut engine = MorphEngine::new(&SceneConfig::default());
        engine.set_target(MorphTarget::Assembled);
        engine.tick(0.5);
        let uniforms = engine.update_foliage(2.0);
        assert_eq!(uniforms.ratio, engine.morph(GroupId::Foliage).ratio());
        assert_eq!(uniforms.time, 0.5);
        assert_eq!(uniforms.pixel_ratio, 2.0);
    }

    #[test]
    fn test_foliage_vertex_endpoints() {
        let layout = layout();
        let engine = MorphEngine::new(&SceneConfig::default());
        let leaf = &layout.foliage[42];

        let scattered = FoliageUniforms::default();
        let p = engine.foliage_vertex(leaf, &scattered);
        assert!(p.distance(&leaf.scatter_position) <= 0.3);

        let assembled = FoliageUniforms { ratio: 1.0, time: 3.0, ..Default::default() };
        let p = engine.foliage_vertex(leaf, &assembled);
        assert!(p.distance(&leaf.tree_position) <= 0.25);
    }
}
