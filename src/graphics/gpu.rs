//! Abstractions over GPU calls which can be profiled.

use miette::{Context, IntoDiagnostic, Result};

use crate::config::WindowConfig;

/// GPU state attached to the window surface.
pub(crate) struct Gpu<'window> {
    /// GPU device.
    pub(crate) device: wgpu::Device,
    /// GPU surface.
    pub(crate) surface: wgpu::Surface<'window>,
    /// GPU queue.
    pub(crate) queue: wgpu::Queue,
    /// GPU surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl<'window> Gpu<'window> {
    /// Create a GPU surface on the window.
    pub(crate) async fn new<W>(
        window_config: &WindowConfig,
        (width, height): (u32, u32),
        window: W,
    ) -> Result<Self>
    where
        W: wgpu::WindowHandle + 'window,
    {
        // Get a handle to our GPU
        let instance = wgpu::Instance::default();

        log::debug!("Creating GPU surface on the window");

        // Create a GPU surface on the window
        let surface = instance
            .create_surface(window)
            .into_diagnostic()
            .wrap_err("Error creating surface on window")?;

        log::debug!("Requesting adapter");

        // Request an adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                // Request an adapter which can render to our surface
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| miette::miette!("Error getting GPU adapter for window"))?;

        log::info!("Using GPU adapter '{}'", adapter.get_info().name);

        // Get the surface capabilities
        let swapchain_capabilities = surface.get_capabilities(&adapter);

        // Prefer an sRGB format, otherwise the colors are too dark
        let format = swapchain_capabilities
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| swapchain_capabilities.formats.first().copied())
            .ok_or_else(|| miette::miette!("GPU adapter can't render to the window surface"))?;
        let alpha_mode = swapchain_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Create the logical device and command queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    // Nothing fancy is drawn, use the lowest limits so it runs everywhere
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .into_diagnostic()
            .wrap_err("Error getting logical GPU device for surface")?;

        // Configure the render surface
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if window_config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            surface,
            queue,
            config,
        })
    }

    /// Start a new rendering event.
    ///
    /// # Errors
    ///
    /// - When the next surface texture could not be acquired.
    pub(crate) fn start(&self) -> Result<Frame<'_>, wgpu::SurfaceError> {
        profiling::scope!("Create command encoder");

        // Get the main render texture
        let surface_texture = {
            profiling::scope!("Retrieve surface texture");

            self.surface.get_current_texture()?
        };

        // Create the encoder
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Snake Command Encoder"),
            });

        // Create a texture view from the main render texture
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Frame {
            encoder,
            surface_view,
            surface_texture,
            queue: &self.queue,
        })
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing the surface to ({width}x{height})");

        // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.reconfigure();
    }

    /// Configure the surface again with the current settings, needed after it's lost.
    pub(crate) fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Texture format of the surface.
    pub(crate) const fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

/// Rendering state for a single frame.
pub(crate) struct Frame<'gpu> {
    /// GPU command encoder.
    pub(crate) encoder: wgpu::CommandEncoder,
    /// GPU surface view.
    pub(crate) surface_view: wgpu::TextureView,
    /// GPU surface texture.
    surface_texture: wgpu::SurfaceTexture,
    /// GPU queue.
    queue: &'gpu wgpu::Queue,
}

impl<'gpu> Frame<'gpu> {
    /// Finish rendering event.
    pub(crate) fn present(self) {
        // Draw to the texture
        {
            profiling::scope!("Submit queue");

            self.queue.submit(Some(self.encoder.finish()));
        }

        // Show the texture in the window
        {
            profiling::scope!("Present surface texture");

            self.surface_texture.present();
        }
    }
}
