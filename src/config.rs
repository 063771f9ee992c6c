// Game configuration: fixed board constants plus the few run-time options
// accepted on the command line.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::coordinates::Coordinates;
use crate::render::Rgb;

/// Number of cells along each side of the (square, wrapping) board
pub const GRID_SIZE: i32 = 20;

/// Side of one cell on the canvas, in pixels
pub const CELL_SIZE: u32 = 15;

/// Canvas side in pixels
pub const CANVAS_SIZE: u32 = GRID_SIZE as u32 * CELL_SIZE;

/// Delay between two ticks in milliseconds
pub const TICK_INTERVAL_MS: u64 = 100;

/// Where the one-cell snake starts after mount and restart
pub const INITIAL_HEAD: Coordinates = Coordinates::new(10, 10);

/// #4CAF50
pub const SNAKE_COLOR: Rgb = Rgb::new(0x4C, 0xAF, 0x50);

/// #FF5722
pub const FOOD_COLOR: Rgb = Rgb::new(0xFF, 0x57, 0x22);

/// Colour of a cleared canvas
pub const BACKGROUND_COLOR: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Bytes of raw keyboard input kept between two loop iterations
pub const INPUT_BUFFER_SIZE: usize = 1024;

/// Polling pause of the main loop while waiting for the next tick
pub const POLL_INTERVAL_MS: u64 = 3;

pub fn tick_interval() -> Duration {
    Duration::from_millis(TICK_INTERVAL_MS)
}

/// Play Snake on a 20x20 wrapping board in the terminal.
///
/// Arrow keys steer, `p` or space pauses, `r` restarts, `q` quits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seed the food placement for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Draw without ANSI colours
    #[arg(long)]
    pub no_color: bool,
}

/// Run-time options of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        GameConfig {
            seed: cli.seed,
            log_file: cli.log_file,
            color: !cli.no_color,
        }
    }
}
