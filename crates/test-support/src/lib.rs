//! Shared test doubles for the logcat-stream workspace.
//!
//! [`RecordingWriter`] stands in for the platform log: it keeps every record
//! it receives and can render them the way `logcat -v tag` would, which lets
//! tests assert on what a developer would actually see. [`FailingWriter`]
//! rejects a configurable number of records before delegating to a recorder.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use record_sink::{LogWriter, MODIFIED_UTF8_NUL, Priority};

/// One record captured by a [`RecordingWriter`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Priority the record was emitted with.
    pub priority: Priority,
    /// Tag the record was emitted with.
    pub tag: String,
    /// Payload exactly as handed to the platform.
    pub payload: Vec<u8>,
}

impl Record {
    /// Decodes the payload lossily, keeping escaped NULs as `C0 80`.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Returns the part of the payload logcat displays.
    ///
    /// The platform treats the modified UTF-8 NUL as the end of the message.
    pub fn visible(&self) -> &[u8] {
        let end = self
            .payload
            .windows(2)
            .position(|pair| pair == MODIFIED_UTF8_NUL)
            .unwrap_or(self.payload.len());
        &self.payload[..end]
    }

    /// Splits the visible payload into the lines `logcat -v tag` prints.
    ///
    /// A single trailing newline is stripped, then every remaining newline
    /// starts a new line.
    pub fn logcat_lines(&self) -> Vec<String> {
        let visible = String::from_utf8_lossy(self.visible());
        let body = visible.strip_suffix('\n').unwrap_or(&visible);
        body.split('\n').map(str::to_owned).collect()
    }
}

/// [`LogWriter`] that records every call in memory.
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingWriter {
    records: Arc<Mutex<Vec<Record>>>,
}

impl RecordingWriter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorder as a shareable platform writer.
    pub fn shared(&self) -> Arc<dyn LogWriter> {
        Arc::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of every record received so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Removes and returns every record received so far.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.lock())
    }

    /// Removes the recorded payloads and returns them.
    pub fn take_payloads(&self) -> Vec<Vec<u8>> {
        self.take().into_iter().map(|record| record.payload).collect()
    }

    /// Removes the recorded payloads and returns them decoded as text.
    pub fn take_texts(&self) -> Vec<String> {
        self.take().iter().map(Record::text).collect()
    }

    /// Removes the recorded records and returns their logcat lines in order.
    pub fn take_lines(&self) -> Vec<String> {
        self.take().iter().flat_map(Record::logcat_lines).collect()
    }

    /// Returns the number of records received so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no record has been received.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl LogWriter for RecordingWriter {
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()> {
        self.lock().push(Record {
            priority,
            tag: tag.to_owned(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// [`LogWriter`] that fails a set number of calls before recording.
#[derive(Clone, Debug, Default)]
pub struct FailingWriter {
    remaining_failures: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
    recorder: RecordingWriter,
}

impl FailingWriter {
    /// Creates a writer whose next `failures` calls return an error.
    pub fn new(failures: usize) -> Self {
        let writer = Self::default();
        writer.fail_next(failures);
        writer
    }

    /// Makes the next `failures` calls return an error.
    pub fn fail_next(&self, failures: usize) {
        self.remaining_failures.store(failures, Ordering::SeqCst);
    }

    /// Returns the number of calls received, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Returns the recorder holding the calls that succeeded.
    pub fn recorder(&self) -> &RecordingWriter {
        &self.recorder
    }

    /// Returns the writer as a shareable platform writer.
    pub fn shared(&self) -> Arc<dyn LogWriter> {
        Arc::new(self.clone())
    }
}

impl LogWriter for FailingWriter {
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "log device unavailable",
            ));
        }
        self.recorder.write_record(priority, tag, payload)
    }
}
