//! crates/record-sink/src/error.rs
//!
//! Error types for record sink operations.

use std::io;

use thiserror::Error;

/// Result type for record sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors surfaced by [`RecordSink`](crate::RecordSink) writes.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The value handed to a dynamic write cannot be viewed as a flat byte sequence.
    #[error("write() argument must be bytes-like, not {type_name}")]
    NotBytesLike {
        /// Short name of the rejected type.
        type_name: String,
    },
    /// The platform log call failed.
    #[error("platform log write failed: {0}")]
    Platform(
        #[from]
        #[source]
        io::Error,
    ),
}

impl From<SinkError> for io::Error {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::Platform(inner) => inner,
            other @ SinkError::NotBytesLike { .. } => {
                Self::new(io::ErrorKind::InvalidInput, other)
            }
        }
    }
}

/// Returns the name of `T` with every module path removed.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>` and
/// `(alloc::string::String, i32)` becomes `(String, i32)`, matching how the
/// type is usually spelled at the call site.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut start = 0;
    for (idx, ch) in full.char_indices() {
        if !(ch.is_alphanumeric() || ch == '_' || ch == ':') {
            short.push_str(last_segment(&full[start..idx]));
            short.push(ch);
            start = idx + ch.len_utf8();
        }
    }
    short.push_str(last_segment(&full[start..]));
    short
}

fn last_segment(path: &str) -> &str {
    path.rfind("::").map_or(path, |idx| &path[idx + 2..])
}
