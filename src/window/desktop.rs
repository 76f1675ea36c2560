//! Setting up a window for desktop platforms.

use miette::{Context, IntoDiagnostic, Result};
use winit::{
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

/// Desktop implementation of opening a window.
pub(crate) fn window(window_builder: WindowBuilder) -> Result<(EventLoop<()>, Window)> {
    let event_loop = EventLoop::new()
        .into_diagnostic()
        .wrap_err("Error setting up event loop for window")?;
    let window = window_builder
        .build(&event_loop)
        .into_diagnostic()
        .wrap_err("Error setting up window")?;

    Ok((event_loop, window))
}
