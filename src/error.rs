//! Error types for pimidi-tools.

use thiserror::Error;

/// Errors raised while building messages, resolving configuration or talking
/// to the MIDI transport.
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric id or value fell outside its declared inclusive bounds.
    #[error("{what} {value} out of range ({min}..={max})")]
    OutOfRange {
        what: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Malformed configuration or an unresolvable port request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The MIDI backend refused to create, enumerate or connect a port.
    #[error("MIDI error: {0}")]
    Midi(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn out_of_range(what: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Error::OutOfRange {
            what: what.into(),
            value,
            min,
            max,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
