use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened or read.
    ///
    /// Load failures are recoverable: the service keeps an empty point set
    /// and remains usable for the next `open` call.
    #[error("failed to load {path}: {source}")]
    LoadFailed {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
