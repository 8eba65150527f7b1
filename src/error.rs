//! Error handling stuff
use displaydoc::Display;
use std::{
    error,
    fmt,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for [`Sysctl`](crate::sysctl::Sysctl) access
///
/// Both variants carry the canonical path that was resolved from the key, so
/// callers can report it without re-deriving it.
#[derive(Debug)]
pub enum Error {
    /// Couldn't read a tunable
    Read {
        /// Underlying OS failure
        reason: io::Error,

        /// Canonical path that was read
        path: PathBuf,
    },

    /// Couldn't write a tunable
    Write {
        /// Underlying OS failure
        reason: io::Error,

        /// Canonical path that was written
        path: PathBuf,

        /// Value that was attempted, as passed by the caller
        value: String,
    },
}

impl Error {
    pub(crate) fn read(reason: io::Error, path: PathBuf) -> Self {
        Self::Read { reason, path }
    }

    pub(crate) fn write(reason: io::Error, path: PathBuf, value: &str) -> Self {
        Self::Write {
            reason,
            path,
            value: value.to_owned(),
        }
    }

    /// Canonical path the failed operation targeted
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// Underlying OS failure
    pub fn reason(&self) -> &io::Error {
        match self {
            Self::Read { reason, .. } | Self::Write { reason, .. } => reason,
        }
    }

    /// Shorthand for `self.reason().kind()`
    pub fn kind(&self) -> io::ErrorKind {
        self.reason().kind()
    }

    /// Whether this was a [`Error::Read`]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Whether this was a [`Error::Write`]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { reason, path } => {
                write!(f, "{} when trying to read from {}", reason, path.display())
            }
            Self::Write {
                reason,
                path,
                value,
            } => write!(
                f,
                "{} when trying to write {} to {}",
                reason,
                value,
                path.display()
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.reason())
    }
}

/// Error type for [`Root`](crate::root::Root)
#[derive(Debug, Display, Error)]
pub enum RootError {
    /// IO Failed: {0}
    Io(#[from] io::Error),

    /// Root path was empty
    Empty,

    /// Root path `{0}` was not valid UTF-8
    InvalidUtf8(String),
}

/// Error type for [`MultiValue`](crate::value::MultiValue)
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum MultiValueError {
    /// Expected {expected} values, got {actual}
    CountMismatch { expected: usize, actual: usize },
}
