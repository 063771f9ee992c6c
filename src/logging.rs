// Tracing setup. Output goes to a file, never to the game screen.
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, SnakeError};

const DEFAULT_FILTER: &str = "canvas_snake=info";

/// Install the tracing subscriber. Stdout is the game screen, so events only
/// go to a log file, and nothing is installed without one.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| SnakeError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .init();
    Ok(())
}
