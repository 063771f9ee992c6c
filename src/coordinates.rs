// Board cells and the four steering directions.
// The board is a torus: stepping off one edge re-enters from the opposite one.
use num::Integer;

use crate::config::GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    /// Neighbouring cell in `direction`, wrapped onto the board
    pub fn step(&self, direction: Direction) -> Coordinates {
        let (dx, dy) = direction.delta();
        Coordinates::new(
            (self.x + dx).mod_floor(&GRID_SIZE),
            (self.y + dy).mod_floor(&GRID_SIZE),
        )
    }

    #[cfg(test)]
    pub fn is_in_bound(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}
