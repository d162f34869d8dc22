use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use record_sink::{LogWriter, Priority, RecordSink};

use crate::encoding::{ErrorPolicy, TextEncoding};

mod builder;
mod guard;
mod writing;

pub use builder::TextLogStreamBuilder;
pub use guard::WriteThroughGuard;

/// Bytes accepted by [`TextLogStream::write`] but not yet forwarded.
#[derive(Debug, Default)]
struct PendingState {
    blocks: Vec<Vec<u8>>,
    len: usize,
    write_through: bool,
}

/// Line-buffered text stream over a [`RecordSink`].
///
/// Text is split into lines and each line into chunks of at most
/// [`MAX_CHARS_PER_CHUNK`](record_sink::MAX_CHARS_PER_CHUNK) characters.
/// Encoded chunks accumulate in a pending buffer that is forwarded as one
/// record whenever a chunk ends a line, write-through is enabled, or the
/// buffer would exceed [`MAX_BYTES_PER_RECORD`](record_sink::MAX_BYTES_PER_RECORD)
/// bytes. Short writes without a newline therefore coalesce into a single
/// record, and no record ever exceeds the ceiling.
///
/// All state sits behind one mutex, so a stream can be shared through an
/// [`Arc`] and lines written from different threads never interleave within
/// a record.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use record_sink::{LogWriter, Priority};
/// use text_stream::TextLogStream;
///
/// let records = Arc::new(Mutex::new(Vec::new()));
/// let seen = Arc::clone(&records);
/// let writer: Arc<dyn LogWriter> = Arc::new(
///     move |_: Priority, _: &str, payload: &[u8]| -> std::io::Result<()> {
///         seen.lock().unwrap().push(String::from_utf8_lossy(payload).into_owned());
///         Ok(())
///     },
/// );
///
/// let stream = TextLogStream::new(Priority::Info, "app.stdout", writer);
/// stream.write("hello ")?;
/// stream.write("world\nnext")?;
/// assert_eq!(*records.lock().unwrap(), ["hello world\n"]);
///
/// stream.flush()?;
/// assert_eq!(*records.lock().unwrap(), ["hello world\n", "next"]);
/// # Ok::<(), text_stream::StreamError>(())
/// ```
pub struct TextLogStream {
    sink: RecordSink,
    encoding: TextEncoding,
    errors: ErrorPolicy,
    state: Mutex<PendingState>,
}

impl TextLogStream {
    /// Creates a UTF-8, strict stream writing records through `writer`.
    pub fn new(priority: Priority, tag: impl Into<String>, writer: Arc<dyn LogWriter>) -> Self {
        Self::from_sink(RecordSink::new(priority, tag, writer))
    }

    /// Creates a UTF-8, strict stream over an existing sink.
    #[must_use]
    pub fn from_sink(sink: RecordSink) -> Self {
        Self::from_parts(sink, TextEncoding::utf8(), ErrorPolicy::Strict, false)
    }

    /// Starts a builder for a stream writing records through `writer`.
    pub fn builder(
        priority: Priority,
        tag: impl Into<String>,
        writer: Arc<dyn LogWriter>,
    ) -> TextLogStreamBuilder {
        TextLogStreamBuilder::new(RecordSink::new(priority, tag, writer))
    }

    fn from_parts(
        sink: RecordSink,
        encoding: TextEncoding,
        errors: ErrorPolicy,
        write_through: bool,
    ) -> Self {
        Self {
            sink,
            encoding,
            errors,
            state: Mutex::new(PendingState {
                write_through,
                ..PendingState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PendingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the canonical name of the output encoding.
    #[must_use]
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    /// Returns the output encoding.
    #[must_use]
    pub const fn text_encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Returns the policy for characters the encoding cannot represent.
    #[must_use]
    pub const fn errors(&self) -> ErrorPolicy {
        self.errors
    }

    /// Returns the binary sink records are forwarded to.
    #[must_use]
    pub const fn buffer(&self) -> &RecordSink {
        &self.sink
    }

    /// Returns the tag attached to every record.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.sink.tag()
    }

    /// Returns the priority attached to every record.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.sink.priority()
    }

    /// Always true: a newline always forwards the pending record.
    #[must_use]
    pub const fn line_buffering(&self) -> bool {
        true
    }

    /// Always true.
    #[must_use]
    pub const fn writable(&self) -> bool {
        true
    }

    /// Always false.
    #[must_use]
    pub const fn readable(&self) -> bool {
        false
    }

    /// Reports whether every write is forwarded immediately.
    #[must_use]
    pub fn write_through(&self) -> bool {
        self.lock().write_through
    }

    /// Enables or disables write-through.
    ///
    /// Pending bytes are not flushed by this call; with write-through
    /// enabled they go out together with the next write.
    pub fn set_write_through(&self, enabled: bool) {
        self.lock().write_through = enabled;
    }

    /// Sets write-through until the returned guard is dropped.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use record_sink::Priority;
    /// use text_stream::TextLogStream;
    ///
    /// let stream = TextLogStream::new(
    ///     Priority::Info,
    ///     "demo",
    ///     Arc::new(|_: Priority, _: &str, _: &[u8]| -> std::io::Result<()> { Ok(()) }),
    /// );
    /// {
    ///     let unbuffered = stream.scoped_write_through(true);
    ///     assert!(unbuffered.write_through());
    /// }
    /// assert!(!stream.write_through());
    /// ```
    pub fn scoped_write_through(&self, enabled: bool) -> WriteThroughGuard<'_> {
        let previous = std::mem::replace(&mut self.lock().write_through, enabled);
        WriteThroughGuard::new(self, previous)
    }

    /// Returns the number of bytes waiting for the next flush.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock().len
    }
}

impl fmt::Debug for TextLogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLogStream")
            .field("tag", &self.sink.tag())
            .field("priority", &self.sink.priority())
            .field("encoding", &self.encoding.name())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
