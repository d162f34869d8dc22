use std::fmt;
use std::sync::Arc;

use crate::priority::Priority;
use crate::writer::LogWriter;

/// Binary stream that forwards each write to the platform as one record.
///
/// The sink owns a `(priority, tag, writer)` triple and nothing else: there
/// is no internal buffering and no partial write. Every non-empty block is
/// escaped with [`escape_nul`](crate::escape_nul) and handed to the
/// [`LogWriter`] in a single call, while the reported length stays that of
/// the caller's block. Empty blocks never reach the platform.
///
/// # Examples
///
/// Forward a block containing a NUL byte:
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use record_sink::{Priority, RecordSink};
///
/// let records = Arc::new(Mutex::new(Vec::new()));
/// let seen = Arc::clone(&records);
/// let sink = RecordSink::new(
///     Priority::Info,
///     "app.stdout",
///     Arc::new(move |_: Priority, _: &str, payload: &[u8]| -> std::io::Result<()> {
///         seen.lock().unwrap().push(payload.to_vec());
///         Ok(())
///     }),
/// );
///
/// assert_eq!(sink.write(b"a\0b")?, 3);
/// assert_eq!(sink.write(b"")?, 0);
/// assert_eq!(*records.lock().unwrap(), vec![b"a\xc0\x80b".to_vec()]);
/// # Ok::<(), record_sink::SinkError>(())
/// ```
#[derive(Clone)]
pub struct RecordSink {
    priority: Priority,
    tag: String,
    writer: Arc<dyn LogWriter>,
}

mod constructors;
mod writing;

pub mod escape;

impl fmt::Debug for RecordSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSink")
            .field("priority", &self.priority)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
