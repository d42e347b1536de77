//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Composition or rendering error
    #[error("{0}")]
    Tiles(#[from] aoc_tiles::TilesError),

    /// Malformed line in the runtime file
    #[error("Invalid runtime entry in {}:{line}: {message}", path.display())]
    RuntimeFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Walking the solutions directory failed
    #[error("Failed to walk solutions: {0}")]
    Walk(#[from] ignore::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
