//! Flush tracing for the line buffer.

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

/// Diagnostic target used by every event this crate emits.
pub const TARGET: &str = "logcat_stream::stream";

/// Trace a pending buffer handed to the record sink.
///
/// # Arguments
///
/// * `tag` - Tag of the flushing stream
/// * `blocks` - Number of encoded chunks joined into the record
/// * `bytes` - Size of the record
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_flush(tag: &str, blocks: usize, bytes: usize) {
    trace!(
        target: TARGET,
        tag = tag,
        blocks = blocks,
        bytes = bytes,
        "flush {}: {} chunk(s), {} bytes",
        tag,
        blocks,
        bytes
    );
}

/// Trace a pending buffer handed to the record sink - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_flush(_tag: &str, _blocks: usize, _bytes: usize) {}

/// Trace a flush the sink rejected; the pending bytes are kept.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_flush_failed(tag: &str, bytes: usize, error: &record_sink::SinkError) {
    warn!(
        target: TARGET,
        tag = tag,
        bytes = bytes,
        error = %error,
        "flush {} failed, keeping {} bytes pending: {}",
        tag,
        bytes,
        error
    );
}

/// Trace a flush the sink rejected - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_flush_failed(_tag: &str, _bytes: usize, _error: &record_sink::SinkError) {}
