use std::io;

use crate::priority::Priority;

/// The platform primitive that emits one log record.
///
/// Implementations receive a priority, a tag, and a payload that never
/// contains NUL bytes (the [`RecordSink`](crate::RecordSink) escapes them
/// beforehand). The payload length is bounded by the callers in this
/// workspace, but implementations must not rely on that: platforms truncate
/// oversized records on their own.
///
/// A writer must not write back into the stream that is calling it. Text
/// streams hold their lock across the call, so such a write blocks forever;
/// route diagnostics raised inside a writer somewhere else.
///
/// Any `Fn(Priority, &str, &[u8]) -> io::Result<()>` closure that is
/// `Send + Sync` implements the trait, which is the usual way to inject a
/// platform callback:
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use record_sink::{LogWriter, Priority};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink_seen = Arc::clone(&seen);
/// let writer = move |priority: Priority, tag: &str, payload: &[u8]| -> std::io::Result<()> {
///     sink_seen.lock().unwrap().push((priority, tag.to_owned(), payload.to_vec()));
///     Ok(())
/// };
///
/// writer.write_record(Priority::Info, "demo", b"hello")?;
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
pub trait LogWriter: Send + Sync {
    /// Emits a single record.
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()>;
}

impl<F> LogWriter for F
where
    F: Fn(Priority, &str, &[u8]) -> io::Result<()> + Send + Sync,
{
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()> {
        self(priority, tag, payload)
    }
}

/// Builds the NUL-terminated tag and payload strings handed to C log APIs.
#[cfg(any(unix, test))]
pub(crate) fn c_strings(
    tag: &str,
    payload: &[u8],
) -> io::Result<(std::ffi::CString, std::ffi::CString)> {
    let tag = std::ffi::CString::new(tag)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "log tag contains a NUL byte"))?;
    // Truncate at the first NUL like the C side would; escaped payloads have none.
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    let payload = std::ffi::CString::new(&payload[..end]).unwrap_or_default();
    Ok((tag, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_implement_log_writer() {
        let calls = Mutex::new(Vec::new());
        let writer = |priority: Priority, tag: &str, payload: &[u8]| -> io::Result<()> {
            calls
                .lock()
                .unwrap()
                .push((priority, tag.to_owned(), payload.to_vec()));
            Ok(())
        };

        writer
            .write_record(Priority::Warn, "tag", b"payload")
            .expect("write succeeds");

        let calls = calls.into_inner().unwrap();
        assert_eq!(calls, vec![(Priority::Warn, "tag".to_owned(), b"payload".to_vec())]);
    }

    #[test]
    fn closure_errors_propagate() {
        let writer =
            |_: Priority, _: &str, _: &[u8]| -> io::Result<()> { Err(io::Error::other("boom")) };
        let err = writer
            .write_record(Priority::Info, "tag", b"x")
            .expect_err("closure fails");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn c_strings_reject_nul_in_tag() {
        let err = c_strings("bad\0tag", b"x").expect_err("tag with NUL");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn c_strings_stop_at_first_payload_nul() {
        let (tag, payload) = c_strings("tag", b"a\0b").expect("valid");
        assert_eq!(tag.as_bytes(), b"tag");
        assert_eq!(payload.as_bytes(), b"a");

        let (_, payload) = c_strings("tag", b"\0hidden").expect("leading NUL is not an error");
        assert_eq!(payload.as_bytes(), b"");
    }
}
