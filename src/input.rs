// Keyboard input: a background thread forwards raw stdin bytes over a channel,
// the main loop buffers them and decodes arrow-key escape sequences and the
// single-letter session keys.
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use circular_buffer::CircularBuffer;
use tracing::{debug, trace};

use crate::config::INPUT_BUFFER_SIZE;
use crate::coordinates::Direction;
use crate::state::GameState;

type InputBuffer = CircularBuffer<INPUT_BUFFER_SIZE, u8>;

const ESC: u8 = 27;
const CSI: u8 = b'[';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub struct KeyDecoder {
    buffer: InputBuffer,
}

impl KeyDecoder {
    pub fn new() -> Self {
        KeyDecoder {
            buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, byte: u8) {
        // if the buffer is full, drop the input
        if self.buffer.is_full() {
            trace!(byte, "input buffer full, byte dropped");
            return;
        }
        self.buffer.push_back(byte);
    }

    /// Next complete command in the buffer. Unknown keys are consumed and
    /// skipped; an unfinished escape sequence stays buffered.
    pub fn next_command(&mut self) -> Option<Command> {
        loop {
            let first = *self.buffer.front()?;
            if first != ESC {
                self.buffer.pop_front();
                match first {
                    b'p' | b'P' | b' ' => return Some(Command::TogglePause),
                    b'r' | b'R' => return Some(Command::Restart),
                    b'q' | b'Q' => return Some(Command::Quit),
                    _ => continue,
                }
            }
            // arrows keys are 3 bytes long: ESC [ and a letter
            let second = *self.buffer.nth_front(1)?;
            if second != CSI {
                self.buffer.pop_front();
                continue;
            }
            let code = *self.buffer.nth_front(2)?;
            for _ in 0..3 {
                self.buffer.pop_front();
            }
            let direction = match code {
                b'A' => Direction::Up,
                b'B' => Direction::Down,
                b'C' => Direction::Right,
                b'D' => Direction::Left,
                _ => continue,
            };
            return Some(Command::Steer(direction));
        }
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys overwrite the direction with no check against the current one;
/// only the last press before a tick matters.
pub fn steer(state: &mut GameState, direction: Direction) {
    if state.direction != direction {
        debug!(from = ?state.direction, to = ?direction, "direction changed");
    }
    state.direction = direction;
}

pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer = [0u8; 1];
        // read one byte at a time; stop when stdin closes or the game is gone
        while reader.read_exact(&mut buffer).is_ok() {
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn decode(bytes: &[u8]) -> Vec<Command> {
        let mut decoder = KeyDecoder::new();
        bytes.iter().for_each(|&b| decoder.push(b));
        std::iter::from_fn(|| decoder.next_command()).collect()
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Command::Steer(Direction::Up),
                Command::Steer(Direction::Down),
                Command::Steer(Direction::Right),
                Command::Steer(Direction::Left),
            ]
        );
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(
            decode(b"p rq"),
            vec![Command::TogglePause, Command::TogglePause, Command::Restart, Command::Quit]
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(decode(b"xyz\x1b[H\x1bO\x1b[A"), vec![Command::Steer(Direction::Up)]);
    }

    #[test]
    fn test_partial_sequence_waits() {
        let mut decoder = KeyDecoder::new();
        decoder.push(ESC);
        decoder.push(CSI);
        assert_eq!(decoder.next_command(), None);
        decoder.push(b'C');
        assert_eq!(decoder.next_command(), Some(Command::Steer(Direction::Right)));
        assert_eq!(decoder.next_command(), None);
    }

    #[test]
    fn test_full_buffer_drops_bytes() {
        let mut decoder = KeyDecoder::new();
        for _ in 0..INPUT_BUFFER_SIZE {
            decoder.push(b'x');
        }
        decoder.push(b'q');
        assert_eq!(decoder.next_command(), None);
    }

    #[test]
    fn test_last_press_wins() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = GameState::new(&mut rng);
        for command in decode(b"\x1b[A\x1b[D\x1b[B") {
            if let Command::Steer(direction) = command {
                steer(&mut state, direction);
            }
        }
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.status, GameStatus::Played);
    }

    #[test]
    fn test_reversal_is_accepted() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = GameState::new(&mut rng);
        steer(&mut state, Direction::Left);
        assert_eq!(state.direction, Direction::Left);
    }
}
