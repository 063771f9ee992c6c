// Session controller: owns the game state, the tick schedule and the food RNG,
// and runs the main loop that interleaves keyboard input, ticks and redraws.
use std::io::Write;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{tick_interval, GameConfig, POLL_INTERVAL_MS};
use crate::error::{Result, SnakeError};
use crate::input::{steer, Command, KeyDecoder};
use crate::render;
use crate::state::{GameState, GameStatus};
use crate::terminal::TerminalView;
use crate::tick::{tick, TickOutcome};
use crate::ticker::Ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    state: GameState,
    ticker: Ticker,
    rng: StdRng,
    dirty: bool,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = GameState::new(&mut rng);
        Session {
            state,
            ticker: Ticker::new(tick_interval()),
            rng,
            dirty: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Arm the tick schedule for the initial Played status.
    pub fn start(&mut self, now: Instant) {
        if self.state.status == GameStatus::Played {
            self.ticker.start(now);
        }
        info!(food = ?self.state.food, "session started");
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state.status {
            GameStatus::Played => {
                self.state.status = GameStatus::Paused;
                self.ticker.stop();
                info!(score = self.state.score, "paused");
            }
            GameStatus::Paused => {
                self.state.status = GameStatus::Played;
                self.ticker.start(now);
                info!("resumed");
            }
            GameStatus::Lost => return,
        }
        self.dirty = true;
    }

    pub fn restart(&mut self, now: Instant) {
        let previous = self.state.status;
        self.state = GameState::new(&mut self.rng);
        self.ticker.start(now);
        self.dirty = true;
        info!(from = ?previous, food = ?self.state.food, "game restarted");
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::Steer(direction) => steer(&mut self.state, direction),
            Command::TogglePause => self.toggle_pause(now),
            Command::Restart => self.restart(now),
            Command::Quit => {
                self.ticker.stop();
                info!(score = self.state.score, "quit");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Run one tick if the schedule is due at `now`.
    pub fn update(&mut self, now: Instant) -> TickOutcome {
        if !self.ticker.poll(now) {
            return TickOutcome::Idle;
        }
        let outcome = tick(&mut self.state, &mut self.rng);
        if outcome == TickOutcome::Collided {
            self.ticker.stop();
        }
        if outcome.changed_state() {
            self.dirty = true;
        }
        outcome
    }

    /// Redraw when something visible changed since the last frame.
    pub fn redraw<W: Write>(&mut self, view: &mut TerminalView, out: &mut W) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        render::draw(&self.state, view.surface());
        view.present(&self.state, out)?;
        self.dirty = false;
        Ok(())
    }

    /// Main loop, until the player quits.
    pub fn run<W: Write>(
        &mut self,
        view: &mut TerminalView,
        input: &Receiver<u8>,
        out: &mut W,
    ) -> Result<()> {
        let mut decoder = KeyDecoder::new();
        self.start(Instant::now());
        loop {
            // receive everything typed since the last iteration
            loop {
                match input.try_recv() {
                    Ok(byte) => decoder.push(byte),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.ticker.stop();
                        return Err(SnakeError::InputDisconnected);
                    }
                }
            }
            // keys read before a tick are applied before it
            while let Some(command) = decoder.next_command() {
                if self.apply(command, Instant::now()) == Flow::Quit {
                    return Ok(());
                }
            }
            let outcome = self.update(Instant::now());
            if outcome != TickOutcome::Idle {
                debug!(?outcome, head = ?self.state.head(), "tick");
            }
            self.redraw(view, out)?;
            thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }
}
