#![forbid(unsafe_code)]

//! Classic snake on a grid, drawn with wgpu in a winit window.
//!
//! The snake moves one cell every tick, grows when it eats food and dies when it leaves the grid or bites itself.
//!
//! # Usage
//!
//! The rules live in [`GameState`] and don't need a window, a [`Session`] drives them from any [`backend::Backend`].
//!
//! ```
//! use gridsnake::{Config, GameState};
//!
//! let mut game = GameState::from_config(&Config::new(10, 10));
//!
//! // Enough time passes for a single step
//! game.tick(0.1);
//!
//! assert_eq!(game.head().y, 6);
//! ```
//!
//! To play it in a window use [`run`]:
//!
//! ```no_run
//! # fn try_main() -> miette::Result<()> {
//! let config = gridsnake::Config::load("data/options.toml")?;
//! let session = gridsnake::run(&config)?;
//!
//! session.report();
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod clock;
pub mod config;
pub mod game;
mod graphics;
pub mod grid;
mod session;
mod window;

pub use config::{Config, WindowConfig};
pub use game::{Collision, GameState, Status, Termination};
pub use grid::{Direction, Grid, GridPosition};
pub use session::Session;

/// Open a window and play a game until it's closed or the snake dies.
///
/// Returns the finished session so the result can be reported.
///
/// # Errors
///
/// - When the window could not be opened.
/// - When no GPU adapter could render to the window.
#[inline]
pub fn run(config: &Config) -> miette::Result<Session> {
    let mut session = Session::from_config(config);

    log::info!(
        "Starting a game on a {}x{} grid",
        config.grid_width,
        config.grid_height
    );

    window::run(config, &mut session)?;

    Ok(session)
}
