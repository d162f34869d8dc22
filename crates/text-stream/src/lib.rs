#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! crates/text-stream/src/lib.rs
//!
//! # Overview
//!
//! `text-stream` is the text half of `logcat-stream`. [`TextLogStream`]
//! accepts arbitrary text and turns it into platform log records through a
//! [`record_sink::RecordSink`], one record per line wherever possible.
//!
//! # Design
//!
//! - [`lines`] splits text on the universal line boundaries and cuts each
//!   line into chunks of at most [`MAX_CHARS_PER_CHUNK`] characters, so an
//!   encoded chunk can never exceed [`MAX_BYTES_PER_RECORD`] bytes in UTF-8.
//! - [`encoding`] converts chunks to bytes with a configurable
//!   [`TextEncoding`] and [`ErrorPolicy`].
//! - The stream keeps encoded chunks pending until a line ends, write-through
//!   is on, or the next chunk would overflow the record ceiling.
//! - [`init_streams`] builds the stdout/stderr pair an embedding host
//!   installs in place of file-descriptor based standard streams.
//! - With the `tracing` feature, `RecordLayer` routes `tracing` events into
//!   the same records.
//!
//! # Invariants
//!
//! - No forwarded record exceeds [`MAX_BYTES_PER_RECORD`] bytes while the
//!   platform accepts every flush.
//! - An empty write, or a flush with nothing pending, makes no platform call.
//! - [`TextLogStream::write`] reports the character count of its input.
//! - Line buffering cannot be disabled.
//!
//! # Errors
//!
//! All fallible operations return [`StreamError`]. Platform failures arrive as
//! [`StreamError::Sink`] and leave the pending bytes in place for a retry.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use record_sink::{LogWriter, Priority};
//! use text_stream::{StdioConfig, init_streams};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let seen = Arc::clone(&lines);
//! let writer: Arc<dyn LogWriter> = Arc::new(
//!     move |priority: Priority, tag: &str, payload: &[u8]| -> std::io::Result<()> {
//!         let text = String::from_utf8_lossy(payload);
//!         seen.lock().unwrap().push(format!("{}/{tag}: {}", priority.letter(), text.trim_end()));
//!         Ok(())
//!     },
//! );
//!
//! let streams = init_streams(writer, &StdioConfig::default())?;
//! streams.stdout.write("hello\nworld\n")?;
//! streams.stderr.write("oops\n")?;
//!
//! assert_eq!(
//!     *lines.lock().unwrap(),
//!     ["I/app.stdout: hello", "I/app.stdout: world", "W/app.stderr: oops"]
//! );
//! # Ok::<(), text_stream::StreamError>(())
//! ```

mod error;
mod stdio;
mod stream;

pub mod encoding;
pub mod lines;
pub mod trace;

#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub mod layer;

pub use encoding::{ErrorPolicy, NEWLINE, ParseErrorPolicyError, TextEncoding};
pub use error::{StreamError, StreamResult};
#[cfg(feature = "tracing")]
pub use layer::{RecordLayer, init_tracing};
pub use record_sink::{MAX_BYTES_PER_RECORD, MAX_CHARS_PER_CHUNK};
pub use stdio::{StdioConfig, StdioStreams, init_streams};
pub use stream::{TextLogStream, TextLogStreamBuilder, WriteThroughGuard};
