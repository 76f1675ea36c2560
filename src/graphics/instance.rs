//! Per-instance data for drawing many colored squares with a single draw call.

use bytemuck::{Pod, Zeroable};
use glam::Affine2;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexStepMode};

/// Shader locations of the instance fields, must come after the ones of [`super::geometry::Vertex`].
const ATTRIBUTES: [VertexAttribute; 4] = wgpu::vertex_attr_array![
    // Matrix columns
    1 => Float32x2,
    2 => Float32x2,
    // Translation
    3 => Float32x2,
    // Color
    4 => Float32x3,
];

/// Raw representation of the instance type send to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct Instance {
    /// First column of the 2x2 matrix.
    x_axis: [f32; 2],
    /// Second column of the 2x2 matrix.
    y_axis: [f32; 2],
    /// Translation.
    translation: [f32; 2],
    /// RGB color.
    color: [f32; 3],
}

/// Raw instance data.
///
/// Shouldn't be used directly outside of the internal rendering code.
#[derive(Debug, Default, Clone)]
pub(crate) struct Instances(Vec<Instance>);

impl Instances {
    /// Push an instance to draw this frame.
    pub(crate) fn push(&mut self, transformation: Affine2, color: [f32; 3]) {
        self.0.push(Instance {
            x_axis: transformation.matrix2.x_axis.to_array(),
            y_axis: transformation.matrix2.y_axis.to_array(),
            translation: transformation.translation.to_array(),
            color,
        });
    }

    /// Remove all items.
    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    /// Get as raw bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }

    /// Amount of instances to draw this frame.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are any.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hand the raw bytes of this frame to `write` and start with an empty frame.
    ///
    /// `write` is not called when nothing was pushed.
    ///
    /// # Returns
    ///
    /// - Amount of instances handed over.
    pub(crate) fn flush(&mut self, write: impl FnOnce(&[u8])) -> u32 {
        let count = self.len() as u32;

        if !self.is_empty() {
            write(self.bytes());
        }

        self.clear();

        count
    }

    /// WGPU descriptor.
    pub(crate) fn descriptor() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}
