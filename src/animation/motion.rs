//! Secondary motion and displayed colour per element kind
//!
//! Each kind has one motion rule with the same signature:
//! `(base transform, phase, time, settled) -> transform`. The base transform
//! already carries the blended position, the group tumble and the static
//! scale; the rule only layers idle motion on top.

use crate::data::ElementKind;
use crate::layout::foliage_color;
use crate::math::{Color, Mat4, Vec3};

/// Position, Euler XYZ rotation and uniform scale of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self { position, rotation, scale }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.rotation, self.scale)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Per-element values that de-synchronise the idle motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPhase {
    /// Position of the element within its group
    pub index: usize,
    /// The element's static [0, 1) random
    pub seed: f32,
    /// Tree position; phases the settled sway
    pub anchor: Vec3,
    /// Outward surface normal at the anchor
    pub normal: Vec3,
    /// Static rotation speed of the element
    pub spin: f32,
}

impl MotionPhase {
    pub fn new(index: usize, seed: f32, anchor: Vec3) -> Self {
        Self { index, seed, anchor, normal: Vec3::UP, spin: 0.0 }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }
}

/// Idle motion rule, one per element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionRule {
    /// Foliage: breathing along the surface normal plus a slow twist
    Breathe,
    /// Boxes and baubles: vertical sway and slow spin
    Sway,
    /// Micro-lights: fast scale flicker
    Flicker,
    /// Ribbon: scale pulse travelling along the spiral
    Pulse,
    /// Star: slow tilt about y and z
    Tilt,
}

impl MotionRule {
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::FoliageParticle => MotionRule::Breathe,
            ElementKind::GiftBox | ElementKind::Bauble => MotionRule::Sway,
            ElementKind::MicroLight => MotionRule::Flicker,
            ElementKind::RibbonSegment => MotionRule::Pulse,
            ElementKind::Star => MotionRule::Tilt,
        }
    }

    pub fn apply(&self, base: Transform, phase: &MotionPhase, time: f32, settled: bool) -> Transform {
        match self {
            MotionRule::Breathe => foliage_motion(base, phase, time, settled),
            MotionRule::Sway => ornament_motion(base, phase, time, settled),
            MotionRule::Flicker => micro_light_motion(base, phase, time, settled),
            MotionRule::Pulse => ribbon_motion(base, phase, time, settled),
            MotionRule::Tilt => star_motion(base, phase, time, settled),
        }
    }
}

/// Low-frequency drift of a scattered ornament, phased by index
fn index_drift(position: Vec3, index: usize, time: f32) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        position.x + (time * 0.5 + i).sin() * 0.02,
        position.y + (time * 0.4 + i).cos() * 0.02,
        position.z,
    )
}

pub fn foliage_motion(base: Transform, phase: &MotionPhase, time: f32, settled: bool) -> Transform {
    let mut pos = base.position;

    if settled {
        let breathe = (time * 1.5 + pos.y * 0.5).sin() * 0.1;
        pos += phase.normal.scale(breathe);

        let angle = time * 0.2 + pos.y * 0.2;
        pos.x += (angle * 0.1).cos() * 0.1;
        pos.z += (angle * 0.1).sin() * 0.1;
    } else {
        let offset = phase.seed * 10.0;
        pos.x += (time + offset).sin() * 0.2;
        pos.y += (time * 0.8 + offset).cos() * 0.2;
    }

    Transform { position: pos, ..base }
}

pub fn ornament_motion(base: Transform, phase: &MotionPhase, time: f32, settled: bool) -> Transform {
    let mut position = base.position;
    if settled {
        position.y += (time * 1.5 + phase.anchor.x).sin() * 0.02;
    } else {
        position = index_drift(position, phase.index, time);
    }

    let mut rotation = base.rotation;
    rotation.y += phase.spin * 0.5 * time;

    Transform { position, rotation, scale: base.scale }
}

pub fn micro_light_motion(base: Transform, phase: &MotionPhase, time: f32, settled: bool) -> Transform {
    if settled {
        let flicker = (time * 5.0 + phase.index as f32 * 10.0).sin() * 0.05;
        Transform { scale: base.scale + flicker * 0.02, ..base }
    } else {
        Transform { position: index_drift(base.position, phase.index, time), ..base }
    }
}

pub fn ribbon_motion(base: Transform, phase: &MotionPhase, time: f32, settled: bool) -> Transform {
    let pulse = ribbon_pulse(time, phase.index);
    let position = if settled { base.position } else { index_drift(base.position, phase.index, time) };

    Transform {
        position,
        rotation: Vec3::ZERO,
        scale: base.scale * (1.0 + pulse * 0.5),
    }
}

pub fn star_motion(base: Transform, _phase: &MotionPhase, time: f32, settled: bool) -> Transform {
    if !settled {
        return base;
    }

    let mut rotation = base.rotation;
    rotation.y += (time * 0.5).sin() * 0.2;
    rotation.z += (time * 0.3).cos() * 0.05;
    Transform { rotation, ..base }
}

/// Travelling pulse in [0, 1]; the wave moves toward higher indices
pub fn ribbon_pulse(time: f32, index: usize) -> f32 {
    (time * 3.0 - index as f32 * 0.05).sin() * 0.5 + 0.5
}

/// Two-level brightness multiplier of a micro-light
pub fn micro_twinkle(time: f32, index: usize) -> f32 {
    let twinkle = (time * 3.0 + index as f32 * 132.0).sin();
    if twinkle > 0.5 { 3.0 } else { 1.0 }
}

/// Colour shown this frame. Micro-lights and ribbon may exceed 1.0 per
/// channel; those values feed the bloom pass unclamped.
pub fn display_color(kind: ElementKind, base: Color, phase: &MotionPhase, time: f32) -> Color {
    match kind {
        ElementKind::MicroLight => base.scale(micro_twinkle(time, phase.index)),
        ElementKind::RibbonSegment => base.lerp(&Color::WHITE, ribbon_pulse(time, phase.index) * 0.5),
        ElementKind::FoliageParticle => foliage_color(base, phase.seed),
        _ => base,
    }
}
