//! Outputs consumed by the JavaScript renderer
//!
//! The crate does not own a GL context. Each frame it fills instance
//! buffers and foliage uniforms; the shader sources here are compiled by
//! the host.

pub mod instances;
pub mod uniforms;
pub mod shaders;

pub use instances::{InstanceBuffer, MATRIX_STRIDE, COLOR_STRIDE};
pub use uniforms::{FoliageUniforms, pixel_ratio_hint, MAX_PIXEL_RATIO};
pub use shaders::{BLOOM_THRESHOLD, BLOOM_KNEE};
