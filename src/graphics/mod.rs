//! Types and helpers for drawing on the GPU.

pub(crate) mod geometry;
pub(crate) mod gpu;
pub(crate) mod instance;
pub(crate) mod pipeline;
pub(crate) mod uniform;

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Mat4};
use miette::Result;
use wgpu::Color;

use crate::{config::Config, grid::Grid};

use self::{gpu::Gpu, pipeline::Pipeline, uniform::UniformState};

/// Projection matrix uniform, maps grid cells to clip space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Projection {
    /// Orthographic column-major matrix.
    matrix: [f32; 16],
}

impl Projection {
    /// Map the whole grid to the screen, with `(0, 0)` in the bottom-left corner.
    pub(crate) fn from_grid(grid: Grid) -> Self {
        let matrix =
            Mat4::orthographic_rh(0.0, grid.width as f32, 0.0, grid.height as f32, 0.0, 1.0)
                .to_cols_array();

        Self { matrix }
    }
}

/// Everything needed for drawing the game to the window.
pub(crate) struct Graphics<'window> {
    /// GPU state.
    gpu: Gpu<'window>,
    /// Uniform projection info for the shader.
    projection: UniformState<Projection>,
    /// Square rendering.
    pipeline: Pipeline,
    /// Color the screen is cleared with.
    background_color: Color,
    /// Whether the surface expects linear colors.
    srgb: bool,
}

impl<'window> Graphics<'window> {
    /// Create a GPU surface on the window and setup the pipeline.
    pub(crate) async fn new<W>(config: &Config, size: (u32, u32), window: W) -> Result<Self>
    where
        W: wgpu::WindowHandle + 'window,
    {
        let gpu = Gpu::new(&config.window, size, window).await?;

        let projection = UniformState::new(&gpu.device, &Projection::from_grid(config.grid()));

        let pipeline = Pipeline::new(
            include_str!(concat!(env!("OUT_DIR"), "/quad.wgsl")),
            &gpu.device,
            gpu.format(),
            &projection,
        );

        let srgb = gpu.format().is_srgb();
        let background_color = u32_to_wgpu_color(config.window.background_color, srgb);

        log::debug!("Render pipeline set up");

        Ok(Self {
            gpu,
            projection,
            pipeline,
            background_color,
            srgb,
        })
    }

    /// Queue a unit square to be drawn this frame.
    pub(crate) fn draw(&mut self, transformation: Affine2, color: [f32; 3]) {
        let color = if self.srgb {
            color.map(|channel| channel.powf(2.2))
        } else {
            color
        };

        self.pipeline.push(transformation, color);
    }

    /// Draw everything queued this frame to the window.
    pub(crate) fn render(&mut self) {
        self.pipeline.upload(&self.gpu.device, &self.gpu.queue);

        let mut frame = match self.gpu.start() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");

                self.gpu.reconfigure();

                return;
            }
            Err(err) => {
                log::warn!("Skipping frame: {err}");

                return;
            }
        };

        {
            let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Snake Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.pipeline.render(&mut render_pass, &self.projection);
        }

        frame.present();
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }
}

/// Convert an ARGB `u32` color to a WGPU [`wgpu::Color`] taking in account sRGB.
fn u32_to_wgpu_color(argb: u32, srgb: bool) -> Color {
    let channel = |shift: u32| f64::from((argb >> shift) & 0xFF) / 255.0;

    let a = channel(24);
    let r = channel(16);
    let g = channel(8);
    let b = channel(0);

    if srgb {
        // The clear color is in linear space, convert so it looks the same as specified
        Color {
            r: r.powf(2.2),
            g: g.powf(2.2),
            b: b.powf(2.2),
            a,
        }
    } else {
        Color { r, g, b, a }
    }
}
