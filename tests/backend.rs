//! Create a back-end for running tests which doesn't actually interface with any OS functionality.

use glam::{Affine2, Vec2};
use gridsnake::{
    backend::{Backend, Drawable, Key},
    clock::GameClock,
    Direction, GameState, Grid, GridPosition, Session, Status, Termination,
};

/// Seconds between frames, exactly representable so every frame fires the clock.
const FRAME_TIME: f32 = 0.125;

/// Test back-end.
///
/// Time advances by a fixed amount every frame.
#[derive(Debug, Default)]
pub struct TestBackend {
    /// Amount of frames run.
    frame: u32,
    /// Keys held during the next frame.
    keys: Vec<Key>,
    /// Everything drawn in the last frame.
    draws: Vec<(Affine2, Drawable)>,
    /// Whether the game asked to stop.
    exit: bool,
}

impl TestBackend {
    /// Run frames until the game asks to stop or the limit is reached.
    fn run(&mut self, session: &mut Session, frames: u32) {
        for _ in 0..frames {
            if self.should_close() {
                return;
            }

            self.draws.clear();
            session.frame(self);
            self.frame += 1;
        }
    }

    /// Amount of squares drawn with a material.
    fn drawn(&self, drawable: Drawable) -> usize {
        self.draws
            .iter()
            .filter(|(_, drawn)| *drawn == drawable)
            .count()
    }
}

impl Backend for TestBackend {
    fn key_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn elapsed_time(&self) -> f32 {
        self.frame as f32 * FRAME_TIME
    }

    fn draw(&mut self, transform: Affine2, drawable: Drawable) {
        self.draws.push((transform, drawable));
    }

    fn request_exit(&mut self) {
        self.exit = true;
    }

    fn should_close(&self) -> bool {
        self.exit
    }
}

/// Game with the food parked in a corner so it's never eaten by accident.
fn game(width: i32, height: i32) -> GameState {
    GameState::with_seed(Grid::new(width, height), 42)
        .with_clock(GameClock::new(0.1))
        .with_food(GridPosition::new(0, 0))
}

#[test]
fn moves_up_without_input() {
    let mut session = Session::new(game(10, 10));
    let mut backend = TestBackend::default();

    // First frame only measures the time
    backend.run(&mut session, 4);

    let state = session.state();
    assert_eq!(state.head(), GridPosition::new(5, 8));
    assert!(state.body().is_empty());
    assert_eq!(state.score(), 0);
    assert!(!backend.should_close());

    assert_eq!(backend.drawn(Drawable::SNAKE_HEAD), 1);
    assert_eq!(backend.drawn(Drawable::SNAKE_BODY), 0);
    assert_eq!(backend.drawn(Drawable::FOOD), 1);
    assert_eq!(
        backend.draws[0].0,
        Affine2::from_translation(Vec2::new(5.0, 8.0))
    );
}

#[test]
fn body_stops_growing_at_target_length() {
    let mut session = Session::new(game(20, 20).with_target_length(3));
    let mut backend = TestBackend::default();

    backend.run(&mut session, 5);

    let state = session.state();
    assert_eq!(state.head(), GridPosition::new(10, 14));
    assert_eq!(
        state.body().iter().copied().collect::<Vec<_>>(),
        [
            GridPosition::new(10, 13),
            GridPosition::new(10, 12),
            GridPosition::new(10, 11)
        ]
    );
    assert_eq!(backend.drawn(Drawable::SNAKE_BODY), 3);
}

#[test]
fn leaving_the_grid_closes_the_game() {
    let mut session = Session::new(
        game(10, 10)
            .with_head(GridPosition::new(9, 5))
            .with_direction(Direction::Right),
    );
    let mut backend = TestBackend::default();

    backend.run(&mut session, 10);

    assert!(backend.should_close());
    assert_eq!(session.state().head(), GridPosition::new(10, 5));
    assert_eq!(
        session.state().status(),
        Status::Terminated(Termination::OutOfBounds)
    );
    // Exit was requested in the second frame
    assert_eq!(backend.frame, 2);
}

#[test]
fn eating_scores_and_grows() {
    let mut session = Session::new(
        GameState::with_seed(Grid::new(10, 10), 7)
            .with_clock(GameClock::new(0.1))
            .with_food(GridPosition::new(5, 6)),
    );
    let mut backend = TestBackend::default();

    backend.run(&mut session, 2);

    let state = session.state();
    assert_eq!(state.head(), GridPosition::new(5, 6));
    assert_eq!(state.score(), 1);
    assert_eq!(state.target_length(), 1);
    assert_eq!(state.food(), None);

    backend.run(&mut session, 1);

    let state = session.state();
    assert_eq!(state.head(), GridPosition::new(5, 7));
    assert_eq!(state.body().len(), 1);

    // A new food item is placed somewhere free
    let food = state.food().expect("food should be placed again");
    assert!(!state.is_occupied(food));
    assert!(state.grid().contains(food));
}

#[test]
fn steering_turns_the_snake() {
    let mut session = Session::new(game(10, 10));
    let mut backend = TestBackend {
        keys: vec![Key::Left],
        ..Default::default()
    };

    backend.run(&mut session, 3);

    assert_eq!(session.state().direction(), Direction::Left);
    assert_eq!(session.state().head(), GridPosition::new(3, 5));
}

#[test]
fn escape_stops_the_loop() {
    let mut session = Session::new(game(10, 10));
    let mut backend = TestBackend {
        keys: vec![Key::Escape],
        ..Default::default()
    };

    backend.run(&mut session, 10);

    assert_eq!(backend.frame, 1);
    assert_eq!(session.state().status(), Status::Running);
}

#[test]
fn final_report_after_game_over() {
    let mut session = Session::new(
        GameState::with_seed(Grid::new(10, 10), 11)
            .with_clock(GameClock::new(0.1))
            .with_head(GridPosition::new(5, 7))
            .with_food(GridPosition::new(5, 8)),
    );
    let mut backend = TestBackend::default();

    backend.run(&mut session, 10);

    assert!(backend.should_close());

    let state = session.state();
    assert_eq!(
        state.status(),
        Status::Terminated(Termination::OutOfBounds)
    );
    // What the report logs
    assert_eq!(state.score(), 1);
    assert_eq!(
        state.body().iter().copied().collect::<Vec<_>>(),
        [GridPosition::new(5, 9)]
    );

    session.report();
}
