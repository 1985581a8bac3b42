use std::fmt;
use std::path::PathBuf;

/// Result type for evstream-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the ingestion layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// CSV reading or writing failed
    Csv(csv::Error),

    /// Directory traversal failed
    WalkDir(walkdir::Error),

    /// A required column is absent from the input header
    MissingColumn(String),

    /// A cell failed to parse (timestamp, session index, etc.)
    Parse(String),

    /// No bronze partition files exist to load
    NoBronzeFiles(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::MissingColumn(col) => write!(f, "Required column '{}' not found", col),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::NoBronzeFiles(dir) => {
                write!(f, "No bronze files found in {}", dir.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::MissingColumn(_) | Error::Parse(_) | Error::NoBronzeFiles(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}
