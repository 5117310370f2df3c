use std::io;
use thiserror::Error;

use super::io::is_input_closed;

/// Top-level error type for the interactive program
///
/// Storage failures are reported at the prompt where they happen, so only
/// console I/O reaches the top.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// True when the console input ended, which is a normal way to quit
    pub fn is_input_closed(&self) -> bool {
        match self {
            AppError::Io(e) => is_input_closed(e),
        }
    }
}
