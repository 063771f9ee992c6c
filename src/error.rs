// Error type for everything around the game loop.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the program around the game. Losing a run is not one of them.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("could not configure the terminal: {0}")]
    Terminal(#[source] io::Error),

    #[error("could not draw to the terminal: {0}")]
    Output(#[from] io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("keyboard input closed")]
    InputDisconnected,
}

pub type Result<T> = std::result::Result<T, SnakeError>;
