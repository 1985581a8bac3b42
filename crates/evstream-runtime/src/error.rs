use std::fmt;

/// Result type for evstream-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the orchestration layer
#[derive(Debug)]
pub enum Error {
    /// Transform core error
    Engine(evstream_types::Error),

    /// Ingestion/persistence layer error
    Ingest(evstream_ingest::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(err) => write!(f, "Engine error: {}", err),
            Error::Ingest(err) => write!(f, "Ingest error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(err) => Some(err),
            Error::Ingest(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<evstream_types::Error> for Error {
    fn from(err: evstream_types::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<evstream_ingest::Error> for Error {
    fn from(err: evstream_ingest::Error) -> Self {
        Error::Ingest(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
