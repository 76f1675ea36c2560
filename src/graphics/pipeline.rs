//! Abstraction for rendering colored unit squares with a shader.

use std::borrow::Cow;

use glam::Affine2;
use wgpu::util::DeviceExt as _;

use super::{
    geometry::{Geometry, Vertex},
    instance::Instances,
    uniform::UniformState,
    Projection,
};

/// The flow for rendering instances with a shader.
pub(crate) struct Pipeline {
    /// All instances to render.
    instances: Instances,
    /// Pipeline of the rendering itself.
    render: wgpu::RenderPipeline,
    /// GPU buffer reference to the corners of the square.
    vertex_buffer: wgpu::Buffer,
    /// GPU buffer reference to the triangles of the square.
    index_buffer: wgpu::Buffer,
    /// Amount of indices in the index buffer.
    index_count: u32,
    /// Amount of instances uploaded for the next render.
    instance_count: u32,
    /// GPU buffer reference to all instances of the squares.
    instance_buffer: wgpu::Buffer,
}

impl Pipeline {
    /// Create and upload a pipeline from a shader.
    pub(crate) fn new(
        shader_source: &str,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        projection: &UniformState<Projection>,
    ) -> Self {
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Quad Render Pipeline Layout"),
                bind_group_layouts: &[&projection.bind_group_layout],
                push_constant_ranges: &[],
            });

        // Upload the shader to the GPU
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader_source)),
        });

        let render = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::descriptor(), Instances::descriptor()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                // Irrelevant since we disable culling
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                // How many samples the pipeline will use
                count: 1,
                // Use all masks
                mask: !0,
                // Disable anti-aliasing
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Every instance is the same square
        let geometry = Geometry::rectangle(1.0, 1.0);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let index_count = geometry.index_count();

        // Create the initial empty instance buffer, will be resized by the render call
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: &[],
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let instances = Instances::default();

        Self {
            instances,
            render,
            vertex_buffer,
            index_buffer,
            index_count,
            instance_count: 0,
            instance_buffer,
        }
    }

    /// Queue a square to be drawn on the next render.
    pub(crate) fn push(&mut self, transformation: Affine2, color: [f32; 3]) {
        self.instances.push(transformation, color);
    }

    /// Upload the queued instances to the GPU and empty the queue.
    ///
    /// Must be called before the render pass is started, when the frame is skipped afterwards the instances are gone.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        profiling::scope!("Upload instances");

        let instance_buffer = &mut self.instance_buffer;
        self.instance_count = self.instances.flush(|bytes| {
            // Grow the buffer when it's too small, otherwise reuse it
            if instance_buffer.size() < bytes.len() as u64 {
                *instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Instance Buffer"),
                    contents: bytes,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });
            } else {
                queue.write_buffer(instance_buffer, 0, bytes);
            }
        });
    }

    /// Draw all uploaded instances.
    pub(crate) fn render<'pass>(
        &'pass mut self,
        render_pass: &mut wgpu::RenderPass<'pass>,
        projection: &'pass UniformState<Projection>,
    ) {
        profiling::scope!("Render instances");

        let instance_count = std::mem::take(&mut self.instance_count);
        if instance_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.render);
        render_pass.set_bind_group(0, &projection.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..instance_count);
    }
}
