//! Tracing setup. The terminal belongs to the UI, so events go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::QuizError;

/// Install a global subscriber appending to `path`.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
pub fn init(path: &Path, default_level: &str) -> Result<(), QuizError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| QuizError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| QuizError::Logging(err.to_string()))
}
