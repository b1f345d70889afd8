//! All error types for the langbundle crate.
//!
//! Every failure is fatal for the current run: the first error aborts the
//! aggregation and is handed back to the caller.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid options, unknown output format or a missing root directory.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A source file could not be decoded into a translation map.
    #[error("unexpected data while processing {}: {message}", path.display())]
    DataFormat { path: PathBuf, message: String },

    /// The final document could not be encoded as JSON.
    #[error("could not generate JSON: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Creates a new data format error for the given source file
    pub fn data_format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::DataFormat {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates an I/O error that names the file or directory involved
    pub fn path_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::PathIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
