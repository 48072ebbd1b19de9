//! Per-instance output buffers for the instanced groups
//!
//! Matrices are column-major, 16 floats per instance. Colours are linear
//! RGB, 3 floats per instance, and are NOT clamped: over-bright kinds rely
//! on the renderer feeding them to bloom before any tone mapping.

use crate::animation::Transform;
use crate::math::Color;

pub const MATRIX_STRIDE: usize = 16;
pub const COLOR_STRIDE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBuffer {
    matrices: Vec<f32>,
    colors: Vec<f32>,
    dirty: bool,
}

impl InstanceBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            matrices: vec![0.0; count * MATRIX_STRIDE],
            colors: vec![0.0; count * COLOR_STRIDE],
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len() / COLOR_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Write one instance; out-of-range indices are ignored
    pub fn write(&mut self, index: usize, transform: &Transform, color: &Color) {
        if index >= self.len() {
            return;
        }

        let m = index * MATRIX_STRIDE;
        self.matrices[m..m + MATRIX_STRIDE].copy_from_slice(transform.to_matrix().as_slice());

        let c = index * COLOR_STRIDE;
        self.colors[c..c + COLOR_STRIDE].copy_from_slice(&color.to_array());
    }

    /// Flag the whole buffer for re-upload
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag after uploading
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn matrix_data(&self) -> &[f32] {
        &self.matrices
    }

    pub fn color_data(&self) -> &[f32] {
        &self.colors
    }

    /// Translation column of one instance matrix
    pub fn position_of(&self, index: usize) -> Option<[f32; 3]> {
        let m = index.checked_mul(MATRIX_STRIDE)?;
        let cols = self.matrices.get(m + 12..m + 15)?;
        Some([cols[0], cols[1], cols[2]])
    }
}
