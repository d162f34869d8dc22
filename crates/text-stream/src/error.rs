//! crates/text-stream/src/error.rs
//!
//! Error types for text stream operations.

use std::io;

use record_sink::SinkError;
use thiserror::Error;

/// Result type for text stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors surfaced by [`TextLogStream`](crate::TextLogStream) operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The value handed to a dynamic write is not text.
    #[error("write() argument must be str, not {type_name}")]
    NotText {
        /// Short name of the rejected type.
        type_name: String,
    },
    /// The configured encoding label is not recognised.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    /// A character cannot be represented and the error policy is strict.
    #[error("'{encoding}' codec can't encode character {character:?}")]
    Unencodable {
        /// Name of the target encoding.
        encoding: &'static str,
        /// The character that has no representation.
        character: char,
    },
    /// The record sink rejected the flushed record.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Sink(inner) => inner.into(),
            other @ (StreamError::NotText { .. } | StreamError::UnknownEncoding(_)) => {
                Self::new(io::ErrorKind::InvalidInput, other)
            }
            other @ StreamError::Unencodable { .. } => {
                Self::new(io::ErrorKind::InvalidData, other)
            }
        }
    }
}
