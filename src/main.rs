use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;

use config::{Cli, GameConfig};
use error::Result;
use session::Session;
use terminal::{RawMode, TerminalView};

mod config;
mod coordinates;
mod error;
mod input;
mod logging;
mod render;
mod session;
mod state;
mod terminal;
mod tick;
mod ticker;

fn main() -> ExitCode {
    let config = GameConfig::from(Cli::parse());
    match play(&config) {
        Ok(score) => {
            println!("Final Score: {}", score);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("snake: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn play(config: &GameConfig) -> Result<u32> {
    logging::init(config.log_file.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(config);
    let stdout = io::stdout();
    // NO_COLOR and CLICOLOR=0 switch colouring off as well
    let color = config.color && colored::control::SHOULD_COLORIZE.should_colorize();
    let mut view = TerminalView::new(color, stdout.is_terminal());
    let input = input::spawn_stdin_channel();

    // restored when dropped, after the stdout lock below
    let _raw_mode = RawMode::enable()?;
    let mut out = stdout.lock();
    session.run(&mut view, &input, &mut out)?;
    Ok(session.state().score)
}
