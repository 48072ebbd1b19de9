use serde::Serialize;
use crate::math::{Color, Vec3};

/// Category of visual element; selects scale band, palette and motion rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Heavy ornament tier
    GiftBox,
    /// Light ornament tier
    Bauble,
    /// Ultra-light ornament tier, emissive
    MicroLight,
    RibbonSegment,
    FoliageParticle,
    Star,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::GiftBox,
        ElementKind::Bauble,
        ElementKind::MicroLight,
        ElementKind::RibbonSegment,
        ElementKind::FoliageParticle,
        ElementKind::Star,
    ];

    /// Prefix used for element ids within a group
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ElementKind::GiftBox => "box",
            ElementKind::Bauble => "bauble",
            ElementKind::MicroLight => "micro",
            ElementKind::RibbonSegment => "ribbon",
            ElementKind::FoliageParticle => "foliage",
            ElementKind::Star => "star",
        }
    }

    /// Whether the element tumbles freely while scattered
    pub fn tumbles(&self) -> bool {
        matches!(self, ElementKind::GiftBox | ElementKind::Bauble | ElementKind::Star)
    }
}

/// Static description of one element. Produced once by the layout
/// generator and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub id: String,
    pub kind: ElementKind,
    pub scatter_position: Vec3,
    pub tree_position: Vec3,
    pub scale: f32,
    pub rotation_speed: f32,
    pub color: Color,
    /// Uniform [0, 1) draw used for motion phase and highlight selection
    pub seed: f32,
}

impl ElementRecord {
    pub fn new(kind: ElementKind, index: usize) -> Self {
        Self {
            id: format!("{}-{}", kind.id_prefix(), index),
            kind,
            scatter_position: Vec3::ZERO,
            tree_position: Vec3::ZERO,
            scale: 1.0,
            rotation_speed: 0.0,
            color: Color::WHITE,
            seed: 0.0,
        }
    }

    pub fn with_positions(mut self, scatter: Vec3, tree: Vec3) -> Self {
        self.scatter_position = scatter;
        self.tree_position = tree;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_seed(mut self, seed: f32) -> Self {
        self.seed = seed;
        self
    }

    /// Blend of the two static positions; `t` = 0 is scattered, 1 is tree
    pub fn blended_position(&self, t: f32) -> Vec3 {
        self.scatter_position.lerp(&self.tree_position, t)
    }
}
