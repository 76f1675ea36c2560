//! Vertex and index data for shapes.

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexStepMode};

/// Shader location of the position.
const ATTRIBUTES: [VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// 2D vertex position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    /// XY position.
    position: [f32; 2],
}

impl Vertex {
    /// Construct a new vertex.
    pub(crate) const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// WGPU descriptor.
    pub(crate) fn descriptor() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Geometry {
    /// Corner positions.
    pub(crate) vertices: Vec<Vertex>,
    /// Triangles referencing the vertices.
    pub(crate) indices: Vec<u16>,
}

impl Geometry {
    /// Rectangle with the bottom-left corner at the origin.
    pub(crate) fn rectangle(width: f32, height: f32) -> Self {
        let vertices = vec![
            // Top right
            Vertex::new(width, height),
            // Bottom right
            Vertex::new(width, 0.0),
            // Bottom left
            Vertex::new(0.0, 0.0),
            // Top left
            Vertex::new(0.0, height),
        ];

        let indices = vec![0, 1, 3, 1, 2, 3];

        Self { vertices, indices }
    }

    /// Amount of indices to draw.
    pub(crate) fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
