//! Error type shared by every stage of cake loading.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading a cake.
///
/// No variant is recoverable inside the library: every error aborts the
/// whole load and no partial cake is returned.
#[derive(Debug, Error)]
pub enum CakeError {
    /// The manifest or a layer file does not exist or is not a regular file.
    #[error("cannot read config file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file exists but reading it failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested cake is not a section of the manifest.
    #[error("no section `{section}` in {}", path.display())]
    MissingSection { section: String, path: PathBuf },

    /// A required key is absent from a section.
    #[error("no key `{key}` in section `{section}`")]
    MissingKey { section: String, key: String },

    /// The `layers` value names no files once split and trimmed.
    #[error("cake `{section}` lists no layers")]
    EmptyLayers { section: String },

    /// The file is not valid INI.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A `%(name)s` reference could not be expanded.
    #[error("bad interpolation in `[{section}] {key}`: {message}")]
    Interpolation {
        section: String,
        key: String,
        message: String,
    },

    /// A path starts with `~` but the home directory is unknown.
    #[error("could not determine home directory")]
    NoHomeDir,
}

impl CakeError {
    /// Builds a [`CakeError::Parse`] for `line` of `path`.
    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn missing_key(section: &str, key: &str) -> Self {
        Self::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// Whether this error reports a missing file.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CakeError>;
