//! Drive a game for every frame of a backend.

use glam::Affine2;

use crate::{
    backend::{Backend, Drawable, Key},
    config::Config,
    game::{Collision, GameState},
    grid::{Direction, GridPosition},
};

/// How fast old FPS values decay in the smoothed average.
const FPS_SMOOTHED_AVERAGE_ALPHA: f32 = 0.8;

/// Keys mapped to the direction they steer to.
///
/// Checked in this order every frame, when multiple are held the last one wins.
const DIRECTION_KEYS: [(Key, Direction); 4] = [
    (Key::Up, Direction::Up),
    (Key::Down, Direction::Down),
    (Key::Left, Direction::Left),
    (Key::Right, Direction::Right),
];

/// A single game being played.
///
/// Every frame follows the same order: handle input, advance the game, draw the game.
#[derive(Debug, Clone)]
pub struct Session {
    /// Rules and state.
    state: GameState,
    /// Backend time of the previous frame.
    last_frame_time: Option<f32>,
    /// Smoothed frames per second.
    frames_per_second: f32,
}

impl Session {
    /// Wrap a game.
    #[inline]
    #[must_use]
    pub const fn new(state: GameState) -> Self {
        Self {
            state,
            last_frame_time: None,
            frames_per_second: 0.0,
        }
    }

    /// Start a new game from the configuration.
    #[inline]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(GameState::from_config(config))
    }

    /// Run a single frame.
    #[inline]
    pub fn frame<B: Backend>(&mut self, backend: &mut B) {
        profiling::scope!("Frame");

        // Seconds since the previous frame, the first frame doesn't advance anything
        let now = backend.elapsed_time();
        let delta_time = self.last_frame_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame_time = Some(now);

        self.handle_input(backend);
        self.update(backend, delta_time);
        self.render(backend);

        if delta_time > 0.0 {
            self.frames_per_second = FPS_SMOOTHED_AVERAGE_ALPHA.mul_add(
                self.frames_per_second,
                (1.0 - FPS_SMOOTHED_AVERAGE_ALPHA) * delta_time.recip(),
            );
            backend.set_info(&format!(" {{FPS: {:.0}}}", self.frames_per_second));
        }
    }

    /// Log the final score and where the snake ended up.
    #[inline]
    pub fn report(&self) {
        log::info!("You have earned {} points", self.state.score());
        log::info!("Your snake currently occupies the points:");
        for GridPosition { x, y } in self.state.body() {
            log::info!("Position: {x}, {y}");
        }
    }

    /// Game being played.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Smoothed amount of frames per second.
    #[inline]
    #[must_use]
    pub const fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    /// Steer with the held keys.
    fn handle_input<B: Backend>(&mut self, backend: &mut B) {
        for (key, direction) in DIRECTION_KEYS {
            if backend.key_held(key) {
                self.state.set_direction(direction);
            }
        }

        if backend.key_held(Key::Escape) {
            log::debug!("Escape pressed, exiting");

            backend.request_exit();
        }
    }

    /// Move the snake, place food and check for collisions.
    fn update<B: Backend>(&mut self, backend: &mut B, delta_time: f32) {
        profiling::scope!("Update");

        if self.state.status().is_terminated() {
            return;
        }

        self.state.tick(delta_time);
        self.state.place_food();

        if self
            .state
            .check_collisions()
            .is_some_and(Collision::is_terminal)
        {
            backend.request_exit();
        }
    }

    /// Draw the head, all body segments and the food.
    fn render<B: Backend>(&self, backend: &mut B) {
        profiling::scope!("Render");

        let cell = |position: GridPosition| Affine2::from_translation(position.as_vec2());

        backend.draw(cell(self.state.head()), Drawable::SNAKE_HEAD);

        for &segment in self.state.body() {
            backend.draw(cell(segment), Drawable::SNAKE_BODY);
        }

        if let Some(food) = self.state.food() {
            backend.draw(cell(food), Drawable::FOOD);
        }
    }
}
