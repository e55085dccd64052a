//! Error type shared by every pipeline step.

use std::path::{Path, PathBuf};

/// Anything that stops a release-info run. None of these are recoverable:
/// the pipeline aborts on the first one.
#[derive(thiserror::Error, Debug)]
pub enum ReleaseError {
    /// One of the three required CMake declarations is absent.
    #[error("{0} not found")]
    MissingField(&'static str),

    #[error("Invalid version component '{0}'")]
    InvalidVersion(String),

    #[error("Invalid settings file {}: {message}", .path.display())]
    Settings { path: PathBuf, message: String },

    #[error("Failed to {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Expected exactly one '#define {name}' in the installer script, found {found}")]
    PlaceholderCount { name: String, found: usize },

    #[error("Image conversion `{program} {args}` failed: {reason}")]
    Converter {
        program: String,
        args: String,
        reason: String,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ReleaseError {
    /// Builds a `map_err` adapter that tags an io error with its path.
    pub fn io(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            operation,
            path,
            source,
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingField(_) | Self::InvalidVersion(_) => 2,
            Self::Settings { .. } => 3,
            Self::Io { .. } => 4,
            Self::PlaceholderCount { .. } => 5,
            Self::Converter { .. } => 6,
            Self::Pattern(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        let err = ReleaseError::MissingField("Url info");
        assert_eq!(err.to_string(), "Url info not found");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn io_adapter_keeps_path_and_operation() {
        let make = ReleaseError::io("write", Path::new("win/app.rc"));
        let err = make(std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"));
        assert_eq!(err.to_string(), "Failed to write win/app.rc: no such directory");
        assert_eq!(err.exit_code(), 4);
    }
}
