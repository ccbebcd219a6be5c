use std::fmt;
use std::io;

/// Crate-wide error type.
///
/// Hot paths (`feed_forward`, `backpropagate_to_deltas`) treat shape misuse as
/// programmer error and panic; everything reachable from external input —
/// construction, dataset loading, starting a training run — validates and
/// returns one of these instead.
#[derive(Debug)]
pub enum Error {
    /// Bad network or training configuration (too few layers, zero batch
    /// size, Softmax selected on a trainable layer, ...).
    InvalidConfig(String),
    /// Malformed IDX data: wrong magic, record-count mismatch, dimension
    /// product mismatch, out-of-range label.
    Format(String),
    /// Underlying I/O failure while reading dataset files.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::Format(msg) => write!(f, "format error: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
