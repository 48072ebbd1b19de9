//! Random and parametric sampling used by the layout generator

pub mod locus;
pub mod weighted;

pub use locus::{
    sample_sphere_volume, sample_cone_lateral_surface, sample_spiral_locus,
    sample_spiral_locus_with_offset, cone_surface_normal,
};
pub use weighted::{Weighted, Band, choose_weighted};
