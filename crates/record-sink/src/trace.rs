//! Record-level tracing: forwarded and failed platform writes.

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

/// Diagnostic target used by every event this crate emits.
///
/// Layers that route tracing events back into a [`RecordSink`](crate::RecordSink)
/// must skip this target, otherwise each forwarded record would produce another.
pub const TARGET: &str = "logcat_stream::sink";

/// Trace a record handed to the platform.
///
/// # Arguments
///
/// * `tag` - Tag of the sink that produced the record
/// * `input_len` - Length of the caller's block
/// * `payload_len` - Length after NUL escaping
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_record(tag: &str, input_len: usize, payload_len: usize) {
    trace!(
        target: TARGET,
        tag = tag,
        input_len = input_len,
        payload_len = payload_len,
        "record {} ({} bytes, {} after escaping)",
        tag,
        input_len,
        payload_len
    );
}

/// Trace a record handed to the platform - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_record(_tag: &str, _input_len: usize, _payload_len: usize) {}

/// Trace a platform write failure.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_record_failed(tag: &str, error: &std::io::Error) {
    warn!(
        target: TARGET,
        tag = tag,
        error = %error,
        "record {} rejected by platform: {}",
        tag,
        error
    );
}

/// Trace a platform write failure - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_record_failed(_tag: &str, _error: &std::io::Error) {}
