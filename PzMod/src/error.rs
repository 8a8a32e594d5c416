//! Error types for `pzmod`

use std::path::PathBuf;

use thiserror::Error;

use crate::mods::ValidationIssue;

/// The error type for `pzmod` operations.
///
/// Validation findings are not errors; they are returned as
/// [`ValidationIssue`] lists. An error means the operation itself could not
/// complete.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations (disk full, permission denied, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Mod Layout Errors ====================
    /// The mod root does not exist or is not a directory.
    #[error("mod directory not found: {path}")]
    ModDirectoryNotFound {
        /// The path the builder was bound to.
        path: PathBuf,
    },

    /// The `mod.info` descriptor does not exist.
    #[error("mod.info not found at {path}")]
    DescriptorNotFound {
        /// The expected descriptor path.
        path: PathBuf,
    },

    /// A directory already contains a `mod.info` and would be overwritten.
    #[error("mod already initialized: {path}")]
    AlreadyInitialized {
        /// The existing descriptor path.
        path: PathBuf,
    },

    // ==================== Build Errors ====================
    /// Validation reported errors and the build was not forced.
    #[error("validation failed with {} error(s); use force to build anyway", count_errors(.issues))]
    ValidationFailed {
        /// The complete issue list that blocked the build.
        issues: Vec<ValidationIssue>,
    },

    /// The output destination exists with the wrong kind (file vs directory).
    #[error("output path collides with an existing entry: {path}")]
    OutputCollision {
        /// The conflicting destination path.
        path: PathBuf,
    },

    /// ZIP archive write error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ==================== Parsing Errors ====================
    /// `pzmod.toml` could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    // ==================== File System Errors ====================
    /// A path has no usable parent or file name.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

fn count_errors(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|issue| issue.is_error()).count()
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// A specialized Result type for `pzmod` operations.
pub type Result<T> = std::result::Result<T, Error>;
