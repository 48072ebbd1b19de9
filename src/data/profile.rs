use serde::Serialize;
use crate::math::Color;
use crate::sampling::{Band, Weighted};
use super::element::ElementKind;

// Palette entries are sRGB as authored; the generator decodes them.
pub const GOLD: Color = Color::from_hex(0xC5A059);
pub const PLATINUM: Color = Color::from_hex(0xffffff);
pub const CHAMPAGNE: Color = Color::from_hex(0xf3e5ab);
pub const DARK_GOLD: Color = Color::from_hex(0xb8860b);
pub const EMERALD: Color = Color::from_hex(0x0f3d24);
pub const WARM_WHITE: Color = Color::from_hex(0xffffee);
pub const RIBBON_GOLD: Color = Color::from_hex(0xffaa00);
pub const STAR_GOLD: Color = Color::from_hex(0xFFD700);
/// Highlight mixed into foliage particles with a high seed; already linear
pub const FOLIAGE_HIGHLIGHT: Color = Color::new(1.0, 0.8, 0.4);

const GIFT_BOX_PALETTE: [Weighted<Color>; 1] = [Weighted::new(GOLD, 1.0)];

const BAUBLE_PALETTE: [Weighted<Color>; 5] = [
    Weighted::new(PLATINUM, 0.15),
    Weighted::new(CHAMPAGNE, 0.20),
    Weighted::new(GOLD, 0.20),
    Weighted::new(DARK_GOLD, 0.15),
    Weighted::new(EMERALD, 0.30),
];

const MICRO_LIGHT_PALETTE: [Weighted<Color>; 1] = [Weighted::new(WARM_WHITE, 1.0)];
const RIBBON_PALETTE: [Weighted<Color>; 1] = [Weighted::new(RIBBON_GOLD, 1.0)];
const FOLIAGE_PALETTE: [Weighted<Color>; 1] = [Weighted::new(EMERALD, 1.0)];
const STAR_PALETTE: [Weighted<Color>; 1] = [Weighted::new(STAR_GOLD, 1.0)];

/// Static visual parameters of a kind, handed to the renderer once
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindProfile {
    pub kind: ElementKind,
    pub scale: Band,
    pub rotation_speed: Band,
    /// sRGB-encoded entries
    pub palette: &'static [Weighted<Color>],
    /// Instance colours may exceed 1.0 and must reach the bloom stage
    /// without clamping or tone mapping
    pub over_bright: bool,
}

impl KindProfile {
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::GiftBox => Self {
                kind,
                scale: Band::new(0.12, 0.24),
                rotation_speed: Band::new(-1.0, 1.0),
                palette: &GIFT_BOX_PALETTE,
                over_bright: false,
            },
            ElementKind::Bauble => Self {
                kind,
                scale: Band::new(0.08, 0.16),
                rotation_speed: Band::new(-0.75, 0.75),
                palette: &BAUBLE_PALETTE,
                over_bright: false,
            },
            ElementKind::MicroLight => Self {
                kind,
                scale: Band::new(0.04, 0.07),
                rotation_speed: Band::fixed(0.0),
                palette: &MICRO_LIGHT_PALETTE,
                over_bright: true,
            },
            ElementKind::RibbonSegment => Self {
                kind,
                scale: Band::fixed(0.08),
                rotation_speed: Band::fixed(0.0),
                palette: &RIBBON_PALETTE,
                over_bright: true,
            },
            ElementKind::FoliageParticle => Self {
                kind,
                scale: Band::fixed(1.0),
                rotation_speed: Band::fixed(0.0),
                palette: &FOLIAGE_PALETTE,
                over_bright: false,
            },
            ElementKind::Star => Self {
                kind,
                scale: Band::fixed(1.0),
                rotation_speed: Band::fixed(0.0),
                palette: &STAR_PALETTE,
                over_bright: false,
            },
        }
    }

    pub fn all() -> Vec<KindProfile> {
        ElementKind::ALL.iter().map(|k| Self::for_kind(*k)).collect()
    }
}
