use rand::Rng;
use crate::data::{ElementKind, ElementRecord, KindProfile, SceneConfig};
use crate::error::{LayoutError, check_dimension};
use crate::math::Vec3;
use crate::sampling::{
    choose_weighted, sample_cone_lateral_surface, sample_sphere_volume,
    sample_spiral_locus_with_offset,
};

/// The three ornament tiers, generated independently
#[derive(Debug, Clone, PartialEq)]
pub struct OrnamentGroups {
    pub gift_boxes: Vec<ElementRecord>,
    pub baubles: Vec<ElementRecord>,
    pub micro_lights: Vec<ElementRecord>,
}

/// Geometry shared by every group: the scatter sphere and the tree cone
pub(crate) fn check_loci(config: &SceneConfig) -> Result<(), LayoutError> {
    check_dimension("scatter_radius", config.scatter_radius)?;
    check_dimension("tree_height", config.tree_height)?;
    check_dimension("tree_radius_base", config.tree_radius_base)?;
    Ok(())
}

/// One ornament tier: sphere scatter, cone tree position, and the
/// kind's scale band, rotation band and palette
pub fn generate_tier<R: Rng + ?Sized>(
    kind: ElementKind,
    count: usize,
    config: &SceneConfig,
    rng: &mut R,
) -> Result<Vec<ElementRecord>, LayoutError> {
    check_loci(config)?;
    let profile = KindProfile::for_kind(kind);
    profile.scale.validate_scale()?;
    if profile.palette.is_empty() {
        return Err(LayoutError::EmptyPalette);
    }

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let scatter = sample_sphere_volume(config.scatter_radius, rng);
        let tree = sample_cone_lateral_surface(config.tree_height, config.tree_radius_base, rng);
        let scale = profile.scale.sample(rng);
        let rotation_speed = profile.rotation_speed.sample(rng);
        let color = choose_weighted(profile.palette, rng)?.to_linear();

        records.push(
            ElementRecord::new(kind, i)
                .with_positions(scatter, tree)
                .with_scale(scale)
                .with_rotation_speed(rotation_speed)
                .with_color(color)
                .with_seed(rng.random()),
        );
    }
    Ok(records)
}

pub fn generate_gift_boxes<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Vec<ElementRecord>, LayoutError> {
    generate_tier(ElementKind::GiftBox, config.populations.gift_boxes, config, rng)
}

pub fn generate_baubles<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Vec<ElementRecord>, LayoutError> {
    generate_tier(ElementKind::Bauble, config.populations.baubles, config, rng)
}

pub fn generate_micro_lights<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Vec<ElementRecord>, LayoutError> {
    generate_tier(ElementKind::MicroLight, config.populations.micro_lights, config, rng)
}

pub fn generate_ornaments<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<OrnamentGroups, LayoutError> {
    Ok(OrnamentGroups {
        gift_boxes: generate_gift_boxes(config, rng)?,
        baubles: generate_baubles(config, rng)?,
        micro_lights: generate_micro_lights(config, rng)?,
    })
}

/// Ribbon segments along the conical helix, base to apex.
/// Segment `i` sits at `t = i / count`.
pub fn generate_ribbon<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Vec<ElementRecord>, LayoutError> {
    check_loci(config)?;
    check_dimension("ribbon_windings", config.ribbon_windings)?;
    check_dimension("ribbon_offset", config.ribbon_offset)?;

    let profile = KindProfile::for_kind(ElementKind::RibbonSegment);
    let count = config.populations.ribbon_segments;
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f32 / count as f32;
        let tree = sample_spiral_locus_with_offset(
            t,
            config.tree_height,
            config.tree_radius_base,
            config.ribbon_windings,
            config.ribbon_offset,
        );
        let scatter = sample_sphere_volume(config.scatter_radius, rng);
        let color = choose_weighted(profile.palette, rng)?.to_linear();

        records.push(
            ElementRecord::new(ElementKind::RibbonSegment, i)
                .with_positions(scatter, tree)
                .with_scale(profile.scale.min)
                .with_color(color)
                .with_seed(t),
        );
    }
    Ok(records)
}

/// The single star: apex of the cone when assembled, floating high above
/// the cloud centre when scattered
pub fn generate_star<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<ElementRecord, LayoutError> {
    check_loci(config)?;
    check_dimension("star_apex_offset", config.star_apex_offset)?;
    check_dimension("star_scatter_lift", config.star_scatter_lift)?;

    let profile = KindProfile::for_kind(ElementKind::Star);
    let tree = Vec3::new(0.0, config.tree_height / 2.0 + config.star_apex_offset, 0.0);
    let mut scatter = sample_sphere_volume(config.scatter_radius, rng);
    scatter.y = scatter.y.abs() + config.star_scatter_lift;
    let color = choose_weighted(profile.palette, rng)?.to_linear();

    let mut star = ElementRecord::new(ElementKind::Star, 0)
        .with_positions(scatter, tree)
        .with_scale(profile.scale.min)
        .with_color(color)
        .with_seed(rng.random());
    star.id = ElementKind::Star.id_prefix().to_string();
    Ok(star)
}
