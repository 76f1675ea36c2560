//! Platform, input and graphics handling.
//!
//! The game only talks to the platform through the [`Backend`] trait, so it can run without a window.

pub mod wgpu;

use glam::Affine2;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    /// Arrow up or 'W'.
    Up,
    /// Arrow down or 'S'.
    Down,
    /// Arrow left or 'A'.
    Left,
    /// Arrow right or 'D'.
    Right,
    /// Close the game.
    Escape,
}

/// Flat colored unit square.
///
/// The geometry is always the same, only the material differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    /// RGB color, every channel between `0.0` and `1.0`.
    pub color: [f32; 3],
}

impl Drawable {
    /// Head of the snake.
    pub const SNAKE_HEAD: Self = Self::new(1.0, 1.0, 0.8);
    /// Body segment of the snake.
    pub const SNAKE_BODY: Self = Self::new(1.0, 1.0, 0.5);
    /// Food item.
    pub const FOOD: Self = Self::new(0.2, 1.0, 0.2);

    /// Create a new drawable with a color.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { color: [r, g, b] }
    }
}

/// How the game interfaces with the platform it runs on.
///
/// Creating the context, polling events and presenting the frame are handled by the implementation around [`crate::Session::frame`].
pub trait Backend {
    /// Whether a key is being held down this frame.
    fn key_held(&self, key: Key) -> bool;

    /// Monotonic seconds since the backend was created.
    fn elapsed_time(&self) -> f32;

    /// Queue a unit square to be drawn this frame.
    ///
    /// # Arguments
    ///
    /// * `transform` - Transformation from the unit square to grid space.
    /// * `drawable` - What to draw.
    fn draw(&mut self, transform: Affine2, drawable: Drawable);

    /// Ask the backend to stop after the current frame.
    fn request_exit(&mut self);

    /// Whether the game loop should stop.
    fn should_close(&self) -> bool;

    /// Show extra information to the player, such as the title bar.
    #[inline]
    #[allow(unused_variables)]
    fn set_info(&mut self, info: &str) {}
}
