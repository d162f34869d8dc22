use std::sync::Arc;

use super::RecordSink;
use crate::priority::Priority;
use crate::writer::LogWriter;

impl RecordSink {
    /// Creates a sink that emits records at `priority` under `tag`.
    #[must_use]
    pub fn new(priority: Priority, tag: impl Into<String>, writer: Arc<dyn LogWriter>) -> Self {
        Self {
            priority,
            tag: tag.into(),
            writer,
        }
    }

    /// Returns the priority attached to every record.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the tag attached to every record.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Borrows the platform writer shared with other sinks.
    #[must_use]
    pub fn writer(&self) -> &Arc<dyn LogWriter> {
        &self.writer
    }

    /// Reports whether the stream accepts writes, which is always the case.
    #[must_use]
    pub const fn writable(&self) -> bool {
        true
    }

    /// Reports whether the stream can be read from, which is never the case.
    #[must_use]
    pub const fn readable(&self) -> bool {
        false
    }
}
