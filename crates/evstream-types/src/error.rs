use std::fmt;

/// Result type for core pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the transform core
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// An operation that is undefined on an empty event set was given one
    EmptyInput(&'static str),

    /// A session contained events from more than one user
    SessionInvariant {
        session_id: String,
        expected: String,
        found: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::EmptyInput(op) => write!(f, "{} requires a non-empty event set", op),
            Error::SessionInvariant {
                session_id,
                expected,
                found,
            } => write!(
                f,
                "session {} mixes users: expected {}, found {}",
                session_id, expected, found
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::EmptyInput(_) | Error::SessionInvariant { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
