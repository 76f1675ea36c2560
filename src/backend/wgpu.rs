//! winit + wgpu backend.

use std::sync::Arc;

use glam::Affine2;
use miette::{Result, WrapErr};
use web_time::Instant;
use winit::{event::Event, keyboard::KeyCode, window::Window};
use winit_input_helper::WinitInputHelper;

use super::{Backend, Drawable, Key};
use crate::{config::Config, graphics::Graphics};

/// Backend implementation that uses winit for window handling and wgpu for drawing stuff on the screen.
pub(crate) struct WgpuWinitBackend {
    /// Keyboard state of the window.
    input: WinitInputHelper,
    /// When the backend was created.
    start: Instant,
    /// Whether the game asked to stop.
    exit: bool,
    /// Surface and pipeline of the window.
    graphics: Graphics<'static>,
    /// Window we draw on.
    window: Arc<Window>,
    /// Title without any extra information.
    title: String,
}

impl WgpuWinitBackend {
    /// Create a surface on the window and setup the render state to it.
    pub(crate) async fn new(config: &Config, window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let graphics = Graphics::new(config, (size.width, size.height), Arc::clone(&window))
            .await
            .wrap_err("Error setting up the rendering pipeline")?;

        Ok(Self {
            input: WinitInputHelper::new(),
            start: Instant::now(),
            exit: false,
            graphics,
            window,
            title: config.window.title.clone(),
        })
    }

    /// Pass an event to the input helper, when it returns `true` a new frame must be run.
    pub(crate) fn handle_event(&mut self, event: &Event<()>) -> bool {
        if !self.input.update(event) {
            return false;
        }

        // Resize render surface if window is resized
        if let Some(new_size) = self.input.window_resized() {
            self.graphics.resize(new_size.width, new_size.height);

            // On MacOS the window needs to be redrawn manually after resizing
            self.window.request_redraw();
        }

        true
    }

    /// Draw everything queued this frame.
    pub(crate) fn present(&mut self) {
        profiling::scope!("Present");

        self.graphics.render();
    }
}

impl Backend for WgpuWinitBackend {
    fn key_held(&self, key: Key) -> bool {
        let codes: &[KeyCode] = match key {
            Key::Up => &[KeyCode::ArrowUp, KeyCode::KeyW],
            Key::Down => &[KeyCode::ArrowDown, KeyCode::KeyS],
            Key::Left => &[KeyCode::ArrowLeft, KeyCode::KeyA],
            Key::Right => &[KeyCode::ArrowRight, KeyCode::KeyD],
            Key::Escape => &[KeyCode::Escape],
        };

        codes.iter().any(|&code| self.input.key_held(code))
    }

    fn elapsed_time(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    fn draw(&mut self, transform: Affine2, drawable: Drawable) {
        self.graphics.draw(transform, drawable.color);
    }

    fn request_exit(&mut self) {
        self.exit = true;
    }

    fn should_close(&self) -> bool {
        // Exit when the window is destroyed or closed
        self.exit || self.input.close_requested() || self.input.destroyed()
    }

    fn set_info(&mut self, info: &str) {
        self.window.set_title(&format!("{}{info}", self.title));
    }
}
