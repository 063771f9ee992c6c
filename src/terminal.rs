// Terminal side of the game: raw keyboard mode and presentation of the canvas.
use std::fmt::Write as _;
use std::io::{self, Write};

use colored::Colorize;
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};
use tracing::debug;

use crate::config::{CELL_SIZE, FOOD_COLOR, GRID_SIZE, SNAKE_COLOR};
use crate::error::{Result, SnakeError};
use crate::render::{PixelCanvas, Rgb, Surface};
use crate::state::{GameState, GameStatus};

const STDIN_FD: i32 = 0;

/// Keeps stdin unbuffered and silent while alive; the previous settings come
/// back on drop, on error paths too.
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        let original = Termios::from_fd(STDIN_FD).map_err(SnakeError::Terminal)?;
        let mut raw = original;
        // no echo and no canonical mode for stdin
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &raw).map_err(SnakeError::Terminal)?;
        // hide the cursor
        print!("\x1b[?25l");
        io::stdout().flush()?;
        debug!("terminal raw mode enabled");
        Ok(RawMode { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        print!("\x1b[?25h");
        let _ = io::stdout().flush();
        let _ = tcsetattr(STDIN_FD, TCSANOW, &self.original);
        debug!("terminal settings restored");
    }
}

fn clear_screen(out: &mut String) {
    out.push_str("\x1b[2J\x1b[1;1H");
}

/// Presents the board canvas and the score/controls line in the terminal.
pub struct TerminalView {
    canvas: Option<PixelCanvas>,
    color: bool,
}

impl TerminalView {
    /// `attached` says whether there is a screen to draw on at all.
    pub fn new(color: bool, attached: bool) -> Self {
        TerminalView {
            canvas: attached.then(PixelCanvas::board),
            color,
        }
    }

    pub fn surface(&mut self) -> Option<&mut dyn Surface> {
        self.canvas.as_mut().map(|canvas| canvas as &mut dyn Surface)
    }

    /// Text of one frame, or `None` when there is no canvas.
    pub fn frame(&self, state: &GameState) -> Option<String> {
        let canvas = self.canvas.as_ref()?;
        let mut out = String::new();
        clear_screen(&mut out);

        //border up
        out.push('▗');
        out.push_str(&"▄▄".repeat(GRID_SIZE as usize));
        out.push_str("▖\r\n");
        for row in 0..GRID_SIZE as u32 {
            out.push('▐');
            for column in 0..GRID_SIZE as u32 {
                // one sample from the middle of each cell
                let x = column * CELL_SIZE + CELL_SIZE / 2;
                let y = row * CELL_SIZE + CELL_SIZE / 2;
                if let Some(pixel) = canvas.pixel(x, y) {
                    out.push_str(&self.cell(pixel));
                }
            }
            out.push_str("▌\r\n");
        }
        //border down
        out.push('▝');
        out.push_str(&"▀▀".repeat(GRID_SIZE as usize));
        out.push_str("▘\r\n");

        let icon = if state.status == GameStatus::Played { "⏸" } else { "▶" };
        let _ = write!(out, "Score: {}   [{}]", state.score, icon);
        if state.status == GameStatus::Lost {
            out.push_str("   Game over");
        }
        out.push_str("\r\narrows: steer  p/space: pause  r: restart  q: quit\r\n");
        Some(out)
    }

    // glyphs carry the board on their own, colour only tints them
    fn cell(&self, pixel: Rgb) -> String {
        let glyph = match pixel {
            p if p == SNAKE_COLOR => "⏺ ",
            p if p == FOOD_COLOR => "♦ ",
            _ => return "  ".to_string(),
        };
        if self.color {
            glyph.truecolor(pixel.r, pixel.g, pixel.b).to_string()
        } else {
            glyph.to_string()
        }
    }

    pub fn present<W: Write>(&self, state: &GameState, out: &mut W) -> Result<()> {
        if let Some(frame) = self.frame(state) {
            out.write_all(frame.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::{Coordinates, Direction};
    use crate::render::draw;
    use std::collections::VecDeque;

    fn state(status: GameStatus, score: u32) -> GameState {
        GameState {
            snake: VecDeque::from([Coordinates::new(1, 0), Coordinates::new(0, 0)]),
            food: Coordinates::new(3, 0),
            direction: Direction::Right,
            status,
            score,
        }
    }

    fn drawn(view: &mut TerminalView, state: &GameState) -> String {
        draw(state, view.surface());
        view.frame(state).unwrap()
    }

    #[test]
    fn test_plain_frame_shows_cells() {
        let mut view = TerminalView::new(false, true);
        let frame = drawn(&mut view, &state(GameStatus::Played, 4));
        let first_row = frame.lines().nth(1).unwrap();
        assert!(first_row.starts_with("▐⏺ ⏺   ♦ "));
        assert!(frame.contains("Score: 4   [⏸]"));
        assert!(!frame.contains("Game over"));
    }

    #[test]
    fn test_status_line() {
        let mut view = TerminalView::new(false, true);
        assert!(drawn(&mut view, &state(GameStatus::Paused, 0)).contains("[▶]"));
        let lost = drawn(&mut view, &state(GameStatus::Lost, 2));
        assert!(lost.contains("Score: 2   [▶]   Game over"));
    }

    #[test]
    fn test_frame_has_one_line_per_row() {
        let mut view = TerminalView::new(false, true);
        let frame = drawn(&mut view, &state(GameStatus::Played, 0));
        let board_rows = frame.lines().filter(|l| l.starts_with('▐')).count();
        assert_eq!(board_rows, GRID_SIZE as usize);
    }

    #[test]
    fn test_colour_view_keeps_glyphs_when_colouring_is_off() {
        colored::control::set_override(false);
        let mut view = TerminalView::new(true, true);
        let frame = drawn(&mut view, &state(GameStatus::Played, 0));
        colored::control::unset_override();
        let first_row = frame.lines().nth(1).unwrap();
        assert!(first_row.starts_with("▐⏺ ⏺   ♦ "));
    }

    #[test]
    fn test_detached_view_draws_nothing() {
        let mut view = TerminalView::new(true, false);
        assert!(view.surface().is_none());
        let mut out = Vec::new();
        view.present(&state(GameStatus::Played, 0), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
