//! crates/text-stream/src/stdio.rs
//! Paired stdout/stderr streams over one platform writer.

use std::sync::Arc;

use record_sink::{LogWriter, Priority};

use crate::encoding::{ErrorPolicy, TextEncoding};
use crate::error::StreamResult;
use crate::stream::TextLogStream;

/// Configuration for the stream pair created by [`init_streams`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StdioConfig {
    /// Priority of standard output records.
    pub stdout_priority: Priority,
    /// Priority of standard error records.
    pub stderr_priority: Priority,
    /// Tag of standard output records.
    pub stdout_tag: String,
    /// Tag of standard error records.
    pub stderr_tag: String,
    /// Encoding label shared by both streams.
    pub encoding: String,
    /// Error policy of standard output.
    pub stdout_errors: ErrorPolicy,
    /// Error policy of standard error.
    pub stderr_errors: ErrorPolicy,
    /// Initial write-through mode of both streams.
    pub write_through: bool,
}

impl Default for StdioConfig {
    fn default() -> Self {
        Self {
            stdout_priority: Priority::Info,
            stderr_priority: Priority::Warn,
            stdout_tag: "app.stdout".to_owned(),
            stderr_tag: "app.stderr".to_owned(),
            encoding: "UTF-8".to_owned(),
            stdout_errors: ErrorPolicy::Strict,
            stderr_errors: ErrorPolicy::BackslashReplace,
            write_through: false,
        }
    }
}

impl StdioConfig {
    /// Derives both tags from an application name: `{name}.stdout` and
    /// `{name}.stderr`.
    pub fn for_app(name: &str) -> Self {
        Self::default().with_tags(format!("{name}.stdout"), format!("{name}.stderr"))
    }

    /// Sets the stdout and stderr priorities.
    #[must_use]
    pub const fn with_priorities(mut self, stdout: Priority, stderr: Priority) -> Self {
        self.stdout_priority = stdout;
        self.stderr_priority = stderr;
        self
    }

    /// Sets the stdout and stderr tags.
    #[must_use]
    pub fn with_tags(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.stdout_tag = stdout.into();
        self.stderr_tag = stderr.into();
        self
    }

    /// Sets the encoding label.
    #[must_use]
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Sets the stdout and stderr error policies.
    #[must_use]
    pub const fn with_errors(mut self, stdout: ErrorPolicy, stderr: ErrorPolicy) -> Self {
        self.stdout_errors = stdout;
        self.stderr_errors = stderr;
        self
    }

    /// Sets the initial write-through mode.
    #[must_use]
    pub const fn with_write_through(mut self, enabled: bool) -> Self {
        self.write_through = enabled;
        self
    }
}

/// The two streams created by [`init_streams`].
#[derive(Debug)]
pub struct StdioStreams {
    /// Stream for standard output.
    pub stdout: TextLogStream,
    /// Stream for standard error.
    pub stderr: TextLogStream,
}

impl StdioStreams {
    /// Flushes both streams, stdout first.
    ///
    /// # Errors
    ///
    /// Returns the first flush error; stderr is flushed even if stdout fails.
    pub fn flush(&self) -> StreamResult<()> {
        let stdout = self.stdout.flush();
        let stderr = self.stderr.flush();
        stdout.and(stderr)
    }
}

/// Creates independent stdout and stderr streams sharing `writer`.
///
/// Nothing global is touched; installing the streams is up to the caller.
///
/// # Errors
///
/// Returns [`StreamError::UnknownEncoding`](crate::StreamError::UnknownEncoding)
/// when the configured label is not recognised.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use record_sink::Priority;
/// use text_stream::{StdioConfig, init_streams};
///
/// let writer = Arc::new(|_: Priority, _: &str, _: &[u8]| -> std::io::Result<()> { Ok(()) });
/// let streams = init_streams(writer, &StdioConfig::for_app("demo"))?;
/// assert_eq!(streams.stdout.tag(), "demo.stdout");
/// assert_eq!(streams.stderr.priority(), Priority::Warn);
/// # Ok::<(), text_stream::StreamError>(())
/// ```
pub fn init_streams(writer: Arc<dyn LogWriter>, config: &StdioConfig) -> StreamResult<StdioStreams> {
    let encoding = TextEncoding::for_label(&config.encoding)?;
    let stream = |priority: Priority, tag: &str, errors: ErrorPolicy| {
        TextLogStream::builder(priority, tag, Arc::clone(&writer))
            .text_encoding(encoding)
            .errors(errors)
            .write_through(config.write_through)
            .build()
    };

    Ok(StdioStreams {
        stdout: stream(config.stdout_priority, &config.stdout_tag, config.stdout_errors)?,
        stderr: stream(config.stderr_priority, &config.stderr_tag, config.stderr_errors)?,
    })
}
