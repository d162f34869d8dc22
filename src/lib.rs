#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `logcat-stream` redirects text and binary output into a record-based
//! platform log such as Android's logcat. Instead of an unbounded byte
//! stream, the platform accepts discrete, size-limited, tagged and leveled
//! records; this crate keeps the familiar "write, flush when you like" stream
//! contract on top of that.
//!
//! The facade re-exports the two layers:
//!
//! - [`RecordSink`] forwards one byte block per record, escaping NUL bytes.
//! - [`TextLogStream`] buffers text by line and packs it into records no
//!   larger than [`MAX_BYTES_PER_RECORD`] bytes.
//!
//! [`init_streams`] builds a stdout/stderr pair over any [`LogWriter`], and
//! [`platform_writer`] returns the native backend for the current target.
//!
//! # Features
//!
//! - `tracing`: diagnostics for sink and stream internals, plus
//!   `RecordLayer` for routing `tracing` events into records.
//! - `serde`: serialization for [`StdioConfig`], [`Priority`] and
//!   [`ErrorPolicy`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logcat_stream::{LogWriter, Priority, StdioConfig, init_streams};
//!
//! let writer: Arc<dyn LogWriter> = Arc::new(
//!     |_: Priority, _: &str, payload: &[u8]| -> std::io::Result<()> {
//!         assert!(payload.len() <= logcat_stream::MAX_BYTES_PER_RECORD);
//!         Ok(())
//!     },
//! );
//!
//! let streams = init_streams(writer, &StdioConfig::for_app("demo"))?;
//! streams.stdout.write(&"x".repeat(10_000))?;
//! streams.flush()?;
//! # Ok::<(), logcat_stream::StreamError>(())
//! ```

pub use record_sink::{
    LogWriter, MAX_BYTES_PER_CHAR, MAX_BYTES_PER_RECORD, MAX_CHARS_PER_CHUNK, MODIFIED_UTF8_NUL,
    Priority, RecordSink, SinkError, SinkResult, escape_nul, unescape_nul,
};
pub use text_stream::{
    ErrorPolicy, StdioConfig, StdioStreams, StreamError, StreamResult, TextEncoding,
    TextLogStream, TextLogStreamBuilder, WriteThroughGuard, init_streams,
};

#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub use text_stream::{RecordLayer, init_tracing};

#[cfg(target_os = "android")]
pub use record_sink::android;
#[cfg(unix)]
pub use record_sink::syslog;

/// Returns the native platform writer for the current target.
///
/// Android builds write through liblog; other Unix hosts fall back to
/// syslog(3) under the user facility.
#[cfg(unix)]
#[must_use]
pub fn platform_writer() -> std::sync::Arc<dyn LogWriter> {
    #[cfg(target_os = "android")]
    {
        std::sync::Arc::new(android::AndroidLogWriter)
    }
    #[cfg(not(target_os = "android"))]
    {
        std::sync::Arc::new(syslog::SyslogWriter::default())
    }
}
