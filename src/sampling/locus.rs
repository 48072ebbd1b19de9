//! Point samplers for the three geometric loci of the scene
//!
//! - solid sphere (scatter cloud), uniform in volume
//! - cone lateral surface (tree silhouette), biased toward the base
//! - conical helix (ribbon), deterministic in its parameter

use std::f32::consts::TAU;
use rand::Rng;
use crate::math::Vec3;

/// Exponent applied to the height fraction; >1 pushes mass toward the base
pub const CONE_HEIGHT_BIAS: f32 = 1.3;
/// Radial depth band around the ideal cone surface
pub const CONE_DEPTH_MIN: f32 = 0.85;
pub const CONE_DEPTH_MAX: f32 = 1.05;
/// Outward clearance of the spiral above the cone surface
pub const SPIRAL_OFFSET: f32 = 0.3;

/// Uniformly distributed point inside a solid sphere
pub fn sample_sphere_volume<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let u: f32 = rng.random();
    let v: f32 = rng.random();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    // Cube root keeps density constant per unit volume
    let r = rng.random::<f32>().cbrt() * radius;
    let sin_phi = phi.sin();

    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Point resting on (or just outside) the lateral surface of a vertically
/// centred cone standing on its base
pub fn sample_cone_lateral_surface<R: Rng + ?Sized>(height: f32, base_radius: f32, rng: &mut R) -> Vec3 {
    let h = rng.random::<f32>().powf(CONE_HEIGHT_BIAS);
    let y = h * height - height / 2.0;
    let radius_at_h = base_radius * (1.0 - h);

    let depth = CONE_DEPTH_MIN + rng.random::<f32>() * (CONE_DEPTH_MAX - CONE_DEPTH_MIN);
    let r = radius_at_h * depth;
    let angle = rng.random::<f32>() * TAU;

    Vec3::new(angle.cos() * r, y, angle.sin() * r)
}

/// Point on a helix wound `windings` times around the tree cone, floating
/// [`SPIRAL_OFFSET`] outside its surface. `t` runs from base (0) to apex (1).
pub fn sample_spiral_locus(t: f32, height: f32, base_radius: f32, windings: f32) -> Vec3 {
    sample_spiral_locus_with_offset(t, height, base_radius, windings, SPIRAL_OFFSET)
}

pub fn sample_spiral_locus_with_offset(t: f32, height: f32, base_radius: f32, windings: f32, offset: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let y = t * height - height / 2.0;
    let radius = base_radius * (1.0 - t) + offset;
    let angle = t * windings * TAU;

    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Outward unit normal of the cone's lateral surface at the azimuth of `p`.
/// Points on the axis get straight up.
pub fn cone_surface_normal(p: Vec3, height: f32, base_radius: f32) -> Vec3 {
    let rho = p.radial_length();
    if rho <= f32::EPSILON || height <= 0.0 {
        return Vec3::UP;
    }
    Vec3::new(p.x / rho * height, base_radius, p.z / rho * height).normalize()
}
