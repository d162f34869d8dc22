#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/record-sink/src/lib.rs
//!
//! # Overview
//!
//! `record-sink` is the binary half of `logcat-stream`. It forwards byte
//! blocks to a record-based platform log (Android's logcat, or syslog on other
//! Unix hosts) one block per record, tagged and prioritised.
//!
//! # Design
//!
//! The crate exposes [`RecordSink`], an immutable `(priority, tag, writer)`
//! triple. The writer is any [`LogWriter`], the narrow seam through which the
//! platform primitive is injected; closures with the right signature qualify,
//! so tests and embedding hosts can supply their own. [`android`] and
//! [`syslog`] provide the native backends.
//!
//! # Invariants
//!
//! - An empty block never reaches the platform.
//! - NUL bytes are replaced by the modified UTF-8 sequence `C0 80` before
//!   forwarding, because C-string log APIs stop at the first NUL.
//! - The length reported for a write is always the caller's block length.
//! - One non-empty write is exactly one platform call; nothing is retried.
//!
//! # Errors
//!
//! [`SinkError::Platform`] carries the [`std::io::Error`] produced by the
//! writer unchanged. [`SinkError::NotBytesLike`] rejects dynamically typed
//! values that are not byte containers.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use record_sink::{LogWriter, Priority, RecordSink, MAX_BYTES_PER_RECORD};
//!
//! let records = Arc::new(Mutex::new(Vec::new()));
//! let seen = Arc::clone(&records);
//! let writer: Arc<dyn LogWriter> = Arc::new(
//!     move |priority: Priority, tag: &str, payload: &[u8]| -> std::io::Result<()> {
//!         seen.lock().unwrap().push(format!(
//!             "{}/{tag}: {}",
//!             priority.letter(),
//!             String::from_utf8_lossy(payload)
//!         ));
//!         Ok(())
//!     },
//! );
//!
//! let sink = RecordSink::new(Priority::Info, "app.stdout", writer);
//! sink.write(b"hello")?;
//! assert_eq!(*records.lock().unwrap(), vec!["I/app.stdout: hello".to_owned()]);
//! assert_eq!(MAX_BYTES_PER_RECORD, 4000);
//! # Ok::<(), record_sink::SinkError>(())
//! ```
//!
//! # See also
//!
//! - `text-stream` for the line-buffered text layer that packs text into
//!   records no larger than [`MAX_BYTES_PER_RECORD`].

mod error;
mod priority;
mod sink;
mod writer;

pub mod limits;
pub mod trace;

#[cfg(target_os = "android")]
#[allow(unsafe_code)]
pub mod android;

#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;

pub use error::{SinkError, SinkResult, short_type_name};
pub use limits::{MAX_BYTES_PER_CHAR, MAX_BYTES_PER_RECORD, MAX_CHARS_PER_CHUNK};
pub use priority::Priority;
pub use sink::RecordSink;
pub use sink::escape::{MODIFIED_UTF8_NUL, escape_nul, unescape_nul};
pub use writer::LogWriter;
