//! Error types for the non-simulation parts of the game: config and save
//! files, level lookup, and frontend I/O.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON file could not be parsed.
    #[error("Parse error in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON value could not be serialized.
    #[error("Failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No manifest exists for the requested level.
    #[error("Unknown level {0}")]
    UnknownLevel(u32),
}
