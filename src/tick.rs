// One advance of the simulation.
// The snake moves from tail to head: a new head is pushed on the front and,
// unless food was eaten, the oldest tail cell is dropped.
use rand::Rng;
use tracing::{debug, info, warn};

use crate::state::{random_free_cell, GameState, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not being played, nothing changed
    Idle,
    Moved,
    Ate,
    /// The new head landed on the snake; the state is now Lost
    Collided,
}

impl TickOutcome {
    pub fn changed_state(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TickOutcome {
    if state.status != GameStatus::Played {
        return TickOutcome::Idle;
    }

    let new_head = state.head().step(state.direction);

    // checked against the snake before moving, tail included
    if state.occupies(&new_head) {
        state.status = GameStatus::Lost;
        info!(score = state.score, length = state.snake.len(), "snake bit itself, game lost");
        return TickOutcome::Collided;
    }

    state.snake.push_front(new_head);

    if new_head == state.food {
        state.score += 1;
        match random_free_cell(&state.snake, rng) {
            Some(food) => state.food = food,
            // board is full: the next tick is bound to collide
            None => warn!("no free cell left for food"),
        }
        debug!(score = state.score, food = ?state.food, "food eaten");
        TickOutcome::Ate
    } else {
        state.snake.pop_back();
        TickOutcome::Moved
    }
}
