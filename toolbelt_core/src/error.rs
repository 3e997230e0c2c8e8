//! Error types for the toolbelt core library
//!
//! Errors are grouped into small categories, each living in its own module,
//! and folded into a single [`Error`] for callers.

use thiserror::Error;

pub mod io;
pub mod network;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::network::NetworkError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the toolbelt core library
///
/// - I/O errors: missing directories, permission problems, walk failures
/// - Validation errors: rejected builder arguments and malformed input
/// - Network errors: failures while probing a URL
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network related errors
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl Error {
    /// True when the error reports a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind == IoErrorKind::NotFound)
    }

    /// True when the error reports a rejected argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Validation(ValidationError::InvalidArgument { .. })
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        let source = std::io::Error::from(err);
        let io_err = IoError::from_std(source);

        Self::Io(match path {
            Some(path) => io_err.with_path(&path),
            None => io_err,
        })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(NetworkError::from_reqwest(err))
    }
}
