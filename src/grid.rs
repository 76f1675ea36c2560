//! Discrete grid coordinates and movement directions.

use glam::{IVec2, Vec2};

/// Cell on the playing field.
///
/// Positions outside of the [`Grid`] are representable, the head of the snake moves there right before the game ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Horizontal cell index, `0` is the left column.
    pub x: i32,
    /// Vertical cell index, `0` is the bottom row.
    pub y: i32,
}

impl GridPosition {
    /// Construct a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move the position a single cell into a direction.
    #[inline]
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        (IVec2::from(self) + direction.velocity()).into()
    }

    /// Bottom-left corner of the cell in world space, used for rendering.
    #[inline]
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        IVec2::from(self).as_vec2()
    }
}

impl From<IVec2> for GridPosition {
    #[inline]
    fn from(vec: IVec2) -> Self {
        Self::new(vec.x, vec.y)
    }
}

impl From<GridPosition> for IVec2 {
    #[inline]
    fn from(position: GridPosition) -> Self {
        Self::new(position.x, position.y)
    }
}

/// Direction the head of the snake travels in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top row.
    #[default]
    Up,
    /// Towards the bottom row.
    Down,
    /// Towards the left column.
    Left,
    /// Towards the right column.
    Right,
}

impl Direction {
    /// All directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit displacement of a single step in this direction.
    ///
    /// The vertical axis points up, the projection places `(0, 0)` in the bottom-left corner.
    #[inline]
    #[must_use]
    pub const fn velocity(self) -> IVec2 {
        match self {
            Self::Up => IVec2::Y,
            Self::Down => IVec2::NEG_Y,
            Self::Left => IVec2::NEG_X,
            Self::Right => IVec2::X,
        }
    }
}

/// Bounded playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Amount of columns.
    pub width: i32,
    /// Amount of rows.
    pub height: i32,
}

impl Grid {
    /// Construct a new grid.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether a position lies inside `[0, width) × [0, height)`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Total amount of cells.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::try_from(self.width).unwrap_or(0) * usize::try_from(self.height).unwrap_or(0)
    }

    /// Cell in the middle of the grid, rounded down.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> GridPosition {
        GridPosition::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell, row by row starting at the bottom.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> {
        let width = self.width;

        (0..self.height).flat_map(move |y| (0..width).map(move |x| GridPosition::new(x, y)))
    }
}
