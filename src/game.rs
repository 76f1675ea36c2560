//! Snake rules: movement, growth, collisions and food placement.
//!
//! Nothing in here knows about windows or the GPU, the [`crate::Session`] feeds it input and time and reads the state back for rendering.

use std::collections::VecDeque;

use crate::{
    clock::GameClock,
    config::Config,
    grid::{Direction, Grid, GridPosition},
};

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Termination {
    /// Head left the grid.
    OutOfBounds,
    /// Head ran into one of the body segments.
    SelfCollision,
}

/// Whether the game is still being played.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Status {
    /// Snake is moving.
    #[default]
    Running,
    /// Game is over, there's no way back.
    Terminated(Termination),
}

impl Status {
    /// Whether the game ended.
    #[inline]
    #[must_use]
    pub const fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}

/// Result of a collision check with something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Collision {
    /// Head is outside of the grid.
    OutOfBounds,
    /// Head overlaps with a body segment.
    SelfCollision,
    /// Head ate the food.
    Food,
}

impl Collision {
    /// Whether this collision ends the game.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::OutOfBounds | Self::SelfCollision)
    }
}

/// Complete state of a single game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Playing field.
    grid: Grid,
    /// Position of the head, tracked separately from the body.
    head: GridPosition,
    /// Previous head positions, most recent first.
    body: VecDeque<GridPosition>,
    /// Direction the head moves in on the next step.
    direction: Direction,
    /// Amount of body segments the snake grows to.
    target_length: usize,
    /// Single food item, absent after being eaten until it's placed again.
    food: Option<GridPosition>,
    /// Points earned by eating food.
    score: u32,
    /// Whether the game is still running.
    status: Status,
    /// Gate for the discrete steps.
    clock: GameClock,
    /// Source for placing food.
    rng: fastrand::Rng,
}

impl GameState {
    /// Start a new game with the head in the center of the grid moving up.
    #[inline]
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, fastrand::Rng::new())
    }

    /// Start a new game with a predictable source of randomness.
    #[inline]
    #[must_use]
    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, fastrand::Rng::with_seed(seed))
    }

    /// Start a new game with a custom source of randomness.
    #[inline]
    #[must_use]
    pub fn with_rng(grid: Grid, rng: fastrand::Rng) -> Self {
        Self {
            grid,
            head: grid.center(),
            body: VecDeque::new(),
            direction: Direction::default(),
            target_length: 0,
            food: None,
            score: 0,
            status: Status::Running,
            clock: GameClock::default(),
            rng,
        }
    }

    /// Start a new game from the configuration.
    #[inline]
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.grid())
            .with_target_length(config.initial_length)
            .with_clock(GameClock::new(config.tick_interval))
    }

    /// Place the head somewhere else.
    #[inline]
    #[must_use]
    pub const fn with_head(mut self, head: GridPosition) -> Self {
        self.head = head;

        self
    }

    /// Set the direction the head starts moving in.
    #[inline]
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;

        self
    }

    /// Set the amount of segments the body grows to.
    #[inline]
    #[must_use]
    pub const fn with_target_length(mut self, target_length: usize) -> Self {
        self.target_length = target_length;

        self
    }

    /// Use a different step interval.
    #[inline]
    #[must_use]
    pub const fn with_clock(mut self, clock: GameClock) -> Self {
        self.clock = clock;

        self
    }

    /// Put the food somewhere specific.
    #[inline]
    #[must_use]
    pub const fn with_food(mut self, food: GridPosition) -> Self {
        self.food = Some(food);

        self
    }

    /// Request a new direction.
    ///
    /// Nothing is rejected, turning around into the body is allowed and will end the game on the next step.
    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Let time pass and perform a single step when the clock fires.
    ///
    /// # Returns
    ///
    /// - `true` when the snake moved.
    #[inline]
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if self.status.is_terminated() || !self.clock.advance(elapsed) {
            return false;
        }

        self.step();

        true
    }

    /// Perform a single discrete step, ignoring the clock.
    #[inline]
    pub fn step(&mut self) {
        if self.body.len() < self.target_length {
            // Grow
            self.body.push_front(self.head);
        } else if !self.body.is_empty() {
            // Shift, the tail follows
            self.body.pop_back();
            self.body.push_front(self.head);
        }

        self.head = self.head.step(self.direction);
    }

    /// Check the head against the walls, the body and the food.
    ///
    /// Checks are done in that order, a terminal collision prevents the rest from being checked.
    /// Eating the food removes it and awards a point.
    #[inline]
    pub fn check_collisions(&mut self) -> Option<Collision> {
        let collision = if !self.grid.contains(self.head) {
            Collision::OutOfBounds
        } else if self.body.contains(&self.head) {
            Collision::SelfCollision
        } else if self.food == Some(self.head) {
            Collision::Food
        } else {
            return None;
        };

        match collision {
            Collision::OutOfBounds => self.terminate(Termination::OutOfBounds),
            Collision::SelfCollision => self.terminate(Termination::SelfCollision),
            Collision::Food => self.eat(),
        }

        Some(collision)
    }

    /// Place a new food item when there is none.
    ///
    /// Tries random cells at most once per cell on the grid, after that a random free cell is picked directly.
    ///
    /// # Returns
    ///
    /// - The newly placed food, `None` if the food was already there or when there's no space left on the grid.
    #[inline]
    pub fn place_food(&mut self) -> Option<GridPosition> {
        if self.food.is_some() {
            return None;
        }

        let cell_count = self.grid.cell_count();
        if cell_count == 0 {
            return None;
        }

        let Self {
            grid,
            head,
            body,
            rng,
            ..
        } = self;
        let is_free = |cell: &GridPosition| *cell != *head && !body.contains(cell);

        let sampled = (0..cell_count)
            .map(|_| GridPosition::new(rng.i32(0..grid.width), rng.i32(0..grid.height)))
            .find(|candidate| is_free(candidate));

        let food = sampled.or_else(|| {
            // Almost everything is taken, pick from what's left
            let free = grid.cells().filter(|cell| is_free(cell)).collect::<Vec<_>>();

            (!free.is_empty()).then(|| free[rng.usize(0..free.len())])
        });

        match food {
            Some(food) => log::debug!("Placing food at ({}, {})", food.x, food.y),
            None => log::warn!("No free cell left to place food on"),
        }

        self.food = food;

        food
    }

    /// Whether a cell is taken by the snake.
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, position: GridPosition) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Playing field.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Position of the head.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> GridPosition {
        self.head
    }

    /// Body segments, most recent first.
    #[inline]
    #[must_use]
    pub const fn body(&self) -> &VecDeque<GridPosition> {
        &self.body
    }

    /// Direction of the next step.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Amount of segments the body grows to.
    #[inline]
    #[must_use]
    pub const fn target_length(&self) -> usize {
        self.target_length
    }

    /// Current food item.
    #[inline]
    #[must_use]
    pub const fn food(&self) -> Option<GridPosition> {
        self.food
    }

    /// Points earned.
    #[inline]
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game is still running.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Consume the food.
    fn eat(&mut self) {
        self.food = None;
        self.score += 1;
        self.target_length += 1;

        log::info!("One point awarded, score is now {}", self.score);
    }

    /// End the game.
    fn terminate(&mut self, termination: Termination) {
        log::info!(
            "Game over: {termination:?} at ({}, {})",
            self.head.x,
            self.head.y
        );

        self.status = Status::Terminated(termination);
    }
}

#[cfg(test)]
mod tests {
    use super::{Collision, GameState, Status, Termination};
    use crate::grid::{Direction, Grid, GridPosition};

    /// Seconds that always trigger a step.
    const STEP: f32 = 0.1;

    fn game(width: i32, height: i32) -> GameState {
        GameState::with_seed(Grid::new(width, height), 1234)
    }

    #[test]
    fn starts_in_center_moving_up() {
        let state = game(30, 30);

        assert_eq!(state.head(), GridPosition::new(15, 15));
        assert_eq!(state.direction(), Direction::Up);
        assert!(state.body().is_empty());
        assert_eq!(state.food(), None);
        assert_eq!(state.status(), Status::Running);
    }

    #[test]
    fn step_moves_head_by_velocity_only() {
        for direction in Direction::ALL {
            let mut state = game(10, 10).with_direction(direction);
            let before = state.head();

            assert!(state.tick(STEP));

            assert_eq!(state.head(), before.step(direction));
            assert!(state.body().is_empty());
        }
    }

    #[test]
    fn small_elapsed_time_does_not_move() {
        let mut state = game(10, 10);

        assert!(!state.tick(0.05));
        assert_eq!(state.head(), GridPosition::new(5, 5));
        assert!(state.tick(0.05));
        assert_eq!(state.head(), GridPosition::new(5, 6));
    }

    #[test]
    fn three_ticks_without_input() {
        let mut state = game(10, 10).with_head(GridPosition::new(5, 5));

        for _ in 0..3 {
            state.tick(STEP);
            assert_eq!(state.check_collisions(), None);
        }

        assert_eq!(state.head(), GridPosition::new(5, 8));
        assert!(state.body().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn body_grows_to_target_and_then_shifts() {
        let mut state = game(20, 20).with_target_length(3);

        for expected in 1..=3 {
            state.tick(STEP);
            assert_eq!(state.body().len(), expected);
        }

        let oldest = *state.body().back().unwrap();
        state.tick(STEP);

        assert_eq!(state.body().len(), 3);
        assert!(!state.body().contains(&oldest));
        // Most recent segment is where the head just was
        assert_eq!(state.body()[0], state.head().step(Direction::Down));
    }

    #[test]
    fn body_never_exceeds_target() {
        let mut state = game(50, 50).with_target_length(5);

        for _ in 0..20 {
            state.tick(STEP);
            assert!(state.body().len() <= state.target_length());
        }
        assert_eq!(state.body().len(), 5);
    }

    #[test]
    fn leaving_the_grid_terminates() {
        let mut state = game(10, 10)
            .with_head(GridPosition::new(9, 5))
            .with_direction(Direction::Right);

        state.tick(STEP);
        assert_eq!(state.head(), GridPosition::new(10, 5));

        assert_eq!(state.check_collisions(), Some(Collision::OutOfBounds));
        assert_eq!(state.status(), Status::Terminated(Termination::OutOfBounds));
    }

    #[test]
    fn leaving_the_bottom_terminates() {
        let mut state = game(10, 10)
            .with_head(GridPosition::new(3, 0))
            .with_direction(Direction::Down);

        state.tick(STEP);

        assert_eq!(state.head(), GridPosition::new(3, -1));
        assert!(state.check_collisions().is_some_and(Collision::is_terminal));
        assert!(state.status().is_terminated());
    }

    #[test]
    fn terminated_game_does_not_move() {
        let mut state = game(10, 10)
            .with_head(GridPosition::new(0, 0))
            .with_direction(Direction::Left);

        state.tick(STEP);
        state.check_collisions();
        let head = state.head();

        assert!(!state.tick(STEP));
        assert_eq!(state.head(), head);
    }

    #[test]
    fn reversing_runs_into_the_body() {
        let mut state = game(10, 10).with_target_length(2);

        state.tick(STEP);
        state.tick(STEP);
        assert_eq!(state.check_collisions(), None);

        // Turning around is allowed
        state.set_direction(Direction::Down);
        assert_eq!(state.direction(), Direction::Down);

        state.tick(STEP);
        assert_eq!(state.check_collisions(), Some(Collision::SelfCollision));
        assert_eq!(
            state.status(),
            Status::Terminated(Termination::SelfCollision)
        );
    }

    #[test]
    fn body_is_checked_before_food() {
        let mut state = game(10, 10)
            .with_target_length(2)
            .with_food(GridPosition::new(5, 6));

        // Walk over the food without checking, it ends up under the body
        state.step();
        state.step();
        state.set_direction(Direction::Down);
        state.step();

        assert_eq!(state.head(), GridPosition::new(5, 6));
        assert_eq!(state.body()[1], GridPosition::new(5, 6));

        assert_eq!(state.check_collisions(), Some(Collision::SelfCollision));
        assert_eq!(state.score(), 0);
        assert_eq!(state.food(), Some(GridPosition::new(5, 6)));
        assert_eq!(
            state.status(),
            Status::Terminated(Termination::SelfCollision)
        );
    }

    #[test]
    fn last_direction_wins() {
        let mut state = game(10, 10);

        state.set_direction(Direction::Left);
        state.set_direction(Direction::Right);
        state.tick(STEP);

        assert_eq!(state.head(), GridPosition::new(6, 5));
    }

    #[test]
    fn eating_food_scores_and_grows() {
        let mut state = game(10, 10).with_food(GridPosition::new(5, 6));

        state.tick(STEP);
        assert_eq!(state.check_collisions(), Some(Collision::Food));

        assert_eq!(state.score(), 1);
        assert_eq!(state.target_length(), 1);
        assert_eq!(state.food(), None);
        assert_eq!(state.status(), Status::Running);

        // New food is placed somewhere else
        let food = state.place_food().unwrap();
        assert_eq!(state.food(), Some(food));
        assert!(!state.is_occupied(food));

        // Body grows on the next step
        state.tick(STEP);
        assert_eq!(state.body().len(), 1);
    }

    #[test]
    fn boundary_is_checked_before_food() {
        let mut state = game(10, 10)
            .with_head(GridPosition::new(5, 9))
            .with_food(GridPosition::new(5, 10));

        state.tick(STEP);

        assert_eq!(state.check_collisions(), Some(Collision::OutOfBounds));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn food_is_kept_when_present() {
        let mut state = game(10, 10).with_food(GridPosition::new(1, 1));

        assert_eq!(state.place_food(), None);
        assert_eq!(state.food(), Some(GridPosition::new(1, 1)));
    }

    #[test]
    fn food_never_lands_on_the_snake() {
        for seed in 0..50 {
            let mut state = GameState::with_seed(Grid::new(6, 6), seed).with_target_length(12);
            let path = [
                Direction::Up,
                Direction::Left,
                Direction::Down,
                Direction::Down,
                Direction::Right,
            ];

            for direction in path {
                state.set_direction(direction);
                for _ in 0..2 {
                    state.tick(STEP);
                    let food = state.place_food().unwrap();

                    assert!(!state.body().contains(&food));
                    assert!(state.grid().contains(food));

                    // Remove the food so a new one is placed on the next round
                    state.food = None;
                }
            }
        }
    }

    #[test]
    fn food_fills_the_last_free_cell() {
        let mut state = GameState::with_seed(Grid::new(2, 2), 7)
            .with_head(GridPosition::new(0, 0))
            .with_target_length(2);
        state.body.push_back(GridPosition::new(1, 0));
        state.body.push_back(GridPosition::new(1, 1));

        assert_eq!(state.place_food(), Some(GridPosition::new(0, 1)));
    }

    #[test]
    fn full_grid_leaves_food_absent() {
        let mut state = GameState::with_seed(Grid::new(2, 1), 7)
            .with_head(GridPosition::new(0, 0))
            .with_target_length(1);
        state.body.push_back(GridPosition::new(1, 0));

        assert_eq!(state.place_food(), None);
        assert_eq!(state.food(), None);
    }
}
