use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Unified error type for all generator operations
///
/// Every variant is fatal to a run: the pipeline never retries or skips past
/// a failing file.
#[derive(Debug, Error)]
pub enum GenError {
    // Corpus errors
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid corpus file name: {0:?}")]
    InvalidFileName(OsString),

    #[error("Corpus entries {first:?} and {second:?} both map to unit {unit:?}")]
    NameCollision {
        unit: String,
        first: String,
        second: String,
    },

    // I/O errors
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    Toml(String),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Attach a path to an I/O error, promoting `NotFound` to its own variant
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            GenError::NotFound(path)
        } else {
            GenError::Io { path, source }
        }
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        GenError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GenError {
    fn from(err: toml::ser::Error) -> Self {
        GenError::Toml(err.to_string())
    }
}
