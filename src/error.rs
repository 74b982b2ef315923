//! Unified error type.

use std::fmt;
use std::io;

use crate::target::RegisterError;

/// The error type returned by a failed mount.
///
/// A missing handler directory is *not* an error — it mounts zero routes.
/// Everything below is fatal: the application must treat a failed mount as
/// a startup failure rather than serve a partially-routed table.
#[derive(Debug)]
pub enum Error {
    /// Listing a directory failed mid-walk.
    Io(io::Error),
    /// A module source failed to produce a handler module.
    ModuleLoad { location: String, source: LoadError },
    /// Two routes resolved to the same name under [`ConflictPolicy::Reject`].
    ///
    /// [`ConflictPolicy::Reject`]: crate::ConflictPolicy::Reject
    DuplicateRoute { name: String },
    /// The route target refused a registration.
    Register { name: String, source: RegisterError },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::ModuleLoad { location, source } => {
                write!(f, "loading module `{location}`: {source}")
            }
            Self::DuplicateRoute { name } => write!(f, "duplicate route `{name}`"),
            Self::Register { name, source } => write!(f, "registering `{name}`: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ModuleLoad { source, .. } => Some(source),
            Self::DuplicateRoute { .. } => None,
            Self::Register { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure to turn a location into a handler module.
///
/// Produced by [`ModuleSource`](crate::ModuleSource) implementations; the
/// mount wraps it with the offending location and aborts.
#[derive(Debug)]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadError {}
