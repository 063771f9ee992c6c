// Run state of one game and the random food placement.
use std::collections::VecDeque;

use rand::Rng;

use crate::config::{GRID_SIZE, INITIAL_HEAD};
use crate::coordinates::{Coordinates, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Played,
    Paused,
    Lost,
}

/// Everything a run of the game mutates. Owned by the session, lent to the
/// tick engine and input handling, read by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: VecDeque<Coordinates>, // The head is the first element
    pub food: Coordinates,
    pub direction: Direction,
    pub status: GameStatus,
    pub score: u32,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let snake = VecDeque::from([INITIAL_HEAD]);
        // a single cell can never cover the board
        let food = random_free_cell(&snake, rng).unwrap_or(INITIAL_HEAD.step(Direction::Right));
        GameState {
            snake,
            food,
            direction: Direction::Right,
            status: GameStatus::Played,
            score: 0,
        }
    }

    pub fn head(&self) -> Coordinates {
        // length is never below one
        self.snake.front().copied().unwrap_or(INITIAL_HEAD)
    }

    pub fn occupies(&self, cell: &Coordinates) -> bool {
        self.snake.contains(cell)
    }
}

/// Uniform draw among cells not covered by `snake`, by redrawing until a free
/// cell comes up. `None` when the snake covers the whole board.
pub fn random_free_cell<R: Rng + ?Sized>(
    snake: &VecDeque<Coordinates>,
    rng: &mut R,
) -> Option<Coordinates> {
    if snake.len() >= (GRID_SIZE * GRID_SIZE) as usize {
        return None;
    }
    loop {
        let candidate = Coordinates::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if !snake.contains(&candidate) {
            return Some(candidate);
        }
    }
}
