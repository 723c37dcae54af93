use thiserror::Error;

/// Why a single snapshot file could not be turned into bars.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: column `{column}` has invalid value {value:?}: {reason}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("line {line}: inconsistent bar ({reason})")]
    InconsistentBar { line: u64, reason: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by every fallible operation of the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No file in the data directory matches the requested symbol.
    #[error("no OHLCV files found for {symbol} in {}", .root.display())]
    NotFound {
        symbol: String,
        root: std::path::PathBuf,
    },

    /// A single file has an invalid structure or value.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: ParseError,
    },

    /// Candidate files existed but none of them could be parsed.
    #[error("no valid data files for {symbol}: all {attempted} candidate file(s) failed to parse")]
    NoValidData { symbol: String, attempted: usize },

    /// Statistics were requested for a series without bars.
    #[error("cannot summarize an empty series")]
    EmptySeries,

    /// The data directory itself could not be listed.
    #[error("failed to list {}: {source}", .root.display())]
    Io {
        root: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Payload-free discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    NoValidData,
    EmptySeries,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::NoValidData { .. } => ErrorKind::NoValidData,
            Error::EmptySeries => ErrorKind::EmptySeries,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn parse<P: AsRef<std::path::Path>>(path: P, source: ParseError) -> Self {
        Error::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
