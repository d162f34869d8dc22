//! crates/text-stream/src/layer.rs
//! Bridge from the tracing crate into platform log records.
//!
//! [`RecordLayer`] is a tracing-subscriber layer that renders each event as
//! one line and writes it through a [`TextLogStream`] chosen by the event's
//! level, so `tracing` output lands in the platform log with a matching
//! priority.
//!
//! Events emitted by this workspace's own diagnostics (targets
//! [`record_sink::trace::TARGET`] and [`crate::trace::TARGET`]) are skipped;
//! they are produced while a stream's lock is held and would otherwise feed
//! back into the stream being traced.
//!
//! A layer cannot return errors, so a failed write is counted instead; see
//! [`RecordLayer::failed_events`]. Events raised on a thread that is already
//! inside [`RecordLayer`], typically by a [`LogWriter`] that logs through
//! `tracing` itself, are counted as failed and dropped: the stream that would
//! receive them may be locked further up the same stack.

use std::cell::Cell;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use record_sink::{LogWriter, Priority};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::error::StreamResult;
use crate::stream::TextLogStream;

/// A tracing layer that writes events to the platform log.
pub struct RecordLayer {
    error: TextLogStream,
    warn: TextLogStream,
    info: TextLogStream,
    debug: TextLogStream,
    verbose: TextLogStream,
    failed: AtomicU64,
}

impl RecordLayer {
    /// Creates a layer writing every level under `tag` through `writer`.
    pub fn new(tag: &str, writer: &Arc<dyn LogWriter>) -> Self {
        let stream = |priority: Priority| TextLogStream::new(priority, tag, Arc::clone(writer));
        Self {
            error: stream(Priority::Error),
            warn: stream(Priority::Warn),
            info: stream(Priority::Info),
            debug: stream(Priority::Debug),
            verbose: stream(Priority::Verbose),
            failed: AtomicU64::new(0),
        }
    }

    /// Maps a tracing level to a record priority.
    #[must_use]
    pub const fn priority_for(level: &Level) -> Priority {
        match *level {
            Level::ERROR => Priority::Error,
            Level::WARN => Priority::Warn,
            Level::INFO => Priority::Info,
            Level::DEBUG => Priority::Debug,
            Level::TRACE => Priority::Verbose,
        }
    }

    /// Returns the stream events at `level` are written to.
    #[must_use]
    pub const fn stream_for(&self, level: &Level) -> &TextLogStream {
        match *level {
            Level::ERROR => &self.error,
            Level::WARN => &self.warn,
            Level::INFO => &self.info,
            Level::DEBUG => &self.debug,
            Level::TRACE => &self.verbose,
        }
    }

    /// Returns the number of events whose record could not be written.
    #[must_use]
    pub fn failed_events(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Flushes every level's stream.
    ///
    /// # Errors
    ///
    /// Returns the first flush error after attempting every stream.
    pub fn flush(&self) -> StreamResult<()> {
        [
            &self.error,
            &self.warn,
            &self.info,
            &self.debug,
            &self.verbose,
        ]
        .into_iter()
        .map(TextLogStream::flush)
        .fold(Ok(()), Result::and)
    }

    fn is_internal(target: &str) -> bool {
        target.starts_with(record_sink::trace::TARGET) || target.starts_with(crate::trace::TARGET)
    }
}

thread_local! {
    static IN_EVENT: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as writing an event until dropped.
struct EventScope;

impl EventScope {
    /// Returns `None` when this thread is already writing an event.
    fn enter() -> Option<Self> {
        IN_EVENT.with(|active| (!active.replace(true)).then_some(Self))
    }
}

impl Drop for EventScope {
    fn drop(&mut self) {
        IN_EVENT.with(|active| active.set(false));
    }
}

impl fmt::Debug for RecordLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordLayer")
            .field("tag", &self.info.tag())
            .field("failed", &self.failed_events())
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for RecordLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_internal(metadata.target()) {
            return;
        }

        let Some(_scope) = EventScope::enter() else {
            self.failed.fetch_add(1, Ordering::Relaxed);
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish();

        if self.stream_for(metadata.level()).write(&line).is_err() {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Visitor rendering an event as `message key=value ...`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(mut self) -> String {
        if self.message.is_empty() {
            self.fields = self.fields.trim_start().to_owned();
        }
        self.message.push_str(&self.fields);
        self.message.push('\n');
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Installs a global subscriber that writes events under `tag`.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_tracing(tag: &str, writer: &Arc<dyn LogWriter>) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(RecordLayer::new(tag, writer))
        .try_init()
}
