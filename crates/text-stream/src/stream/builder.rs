use record_sink::RecordSink;

use super::TextLogStream;
use crate::encoding::{ErrorPolicy, TextEncoding};
use crate::error::StreamResult;

#[derive(Clone, Debug)]
enum EncodingChoice {
    Resolved(TextEncoding),
    Label(String),
}

/// Builder for [`TextLogStream`] instances with a non-default configuration.
///
/// ```
/// use std::sync::Arc;
/// use record_sink::Priority;
/// use text_stream::{ErrorPolicy, TextLogStream};
///
/// let stream = TextLogStream::builder(
///     Priority::Warn,
///     "app.stderr",
///     Arc::new(|_: Priority, _: &str, _: &[u8]| -> std::io::Result<()> { Ok(()) }),
/// )
/// .encoding("latin1")
/// .errors(ErrorPolicy::BackslashReplace)
/// .build()?;
///
/// assert_eq!(stream.encoding(), "windows-1252");
/// assert_eq!(stream.errors(), ErrorPolicy::BackslashReplace);
/// # Ok::<(), text_stream::StreamError>(())
/// ```
#[derive(Clone, Debug)]
#[must_use = "call build() to create the stream"]
pub struct TextLogStreamBuilder {
    sink: RecordSink,
    encoding: EncodingChoice,
    errors: ErrorPolicy,
    write_through: bool,
}

impl TextLogStreamBuilder {
    /// Starts a builder over `sink` with UTF-8, strict, buffered defaults.
    pub fn new(sink: RecordSink) -> Self {
        Self {
            sink,
            encoding: EncodingChoice::Resolved(TextEncoding::utf8()),
            errors: ErrorPolicy::Strict,
            write_through: false,
        }
    }

    /// Selects the output encoding by label; resolved by [`build`](Self::build).
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = EncodingChoice::Label(label.into());
        self
    }

    /// Selects an already resolved output encoding.
    pub fn text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = EncodingChoice::Resolved(encoding);
        self
    }

    /// Sets the policy for characters the encoding cannot represent.
    pub const fn errors(mut self, errors: ErrorPolicy) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the initial write-through mode.
    pub const fn write_through(mut self, enabled: bool) -> Self {
        self.write_through = enabled;
        self
    }

    /// Builds the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnknownEncoding`](crate::StreamError::UnknownEncoding)
    /// when the label passed to [`encoding`](Self::encoding) is not recognised.
    pub fn build(self) -> StreamResult<TextLogStream> {
        let encoding = match self.encoding {
            EncodingChoice::Resolved(encoding) => encoding,
            EncodingChoice::Label(label) => TextEncoding::for_label(&label)?,
        };
        Ok(TextLogStream::from_parts(
            self.sink,
            encoding,
            self.errors,
            self.write_through,
        ))
    }
}
