//! Spawn a winit window and run the game loop.

mod desktop;

use std::sync::Arc;

use miette::{IntoDiagnostic, Result, WrapErr};
use winit::{dpi::LogicalSize, event_loop::ControlFlow, window::WindowBuilder};

use crate::{
    backend::{wgpu::WgpuWinitBackend, Backend},
    config::Config,
    session::Session,
};

/// Open a window and run frames of the session until it's closed.
///
/// # Errors
///
/// - When the window or the GPU surface on it could not be created.
pub(crate) fn run(config: &Config, session: &mut Session) -> Result<()> {
    let window_builder = WindowBuilder::new()
        .with_title(config.window.title.clone())
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        // The grid is always stretched over the whole window
        .with_resizable(false);

    let (event_loop, window) = desktop::window(window_builder)?;

    // Wrap the window in an atomic reference counter so it can be shared with the surface
    let window = Arc::new(window);

    let mut backend = pollster::block_on(WgpuWinitBackend::new(config, window))?;

    log::debug!("Opening window with game loop");

    // Set the event loop to polling so we don't have to wait for new events to draw new frames
    event_loop.set_control_flow(ControlFlow::Poll);

    // Start the window and game loop
    event_loop
        .run(|event, elwt| {
            // Pass every event to the input helper, when it returns `true` it's time to run the logic
            if !backend.handle_event(&event) {
                return;
            }

            if backend.should_close() {
                elwt.exit();
                return;
            }

            session.frame(&mut backend);
            backend.present();

            // Tell the profiler we've executed a frame
            profiling::finish_frame!();
        })
        .into_diagnostic()
        .wrap_err("Error running game loop")?;

    Ok(())
}
