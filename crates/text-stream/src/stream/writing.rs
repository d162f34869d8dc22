use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use record_sink::{MAX_BYTES_PER_RECORD, MAX_CHARS_PER_CHUNK, short_type_name};

use super::{PendingState, TextLogStream};
use crate::encoding::NEWLINE;
use crate::error::{StreamError, StreamResult};
use crate::lines::{CharChunks, LineSegments};
use crate::trace::{trace_flush, trace_flush_failed};

impl TextLogStream {
    /// Writes `text`, returning its length in characters.
    ///
    /// Each line is forwarded as soon as its terminator is written. An empty
    /// string is a no-op. The whole call holds the stream's lock, so the
    /// lines of one write are never interleaved with another thread's. The
    /// lock is not reentrant: a [`LogWriter`](record_sink::LogWriter) that
    /// writes back into this stream deadlocks.
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::Unencodable`] under a strict error policy,
    /// or with [`StreamError::Sink`] when a flush is rejected. Chunks
    /// appended before the failure stay pending.
    pub fn write(&self, text: &str) -> StreamResult<usize> {
        let mut state = self.lock();
        for segment in LineSegments::new(text) {
            for chunk in CharChunks::new(&segment, MAX_CHARS_PER_CHUNK) {
                self.write_chunk(&mut state, chunk)?;
            }
        }
        Ok(text.chars().count())
    }

    /// Writes a dynamically typed value that must be text.
    ///
    /// Accepts `String`, `&'static str`, `Box<str>` and `Cow<'static, str>`.
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
    /// assert_eq!(stream.write_value(&String::from("h\u{e9}"))?, 2);
    ///
    /// let err = stream.write_value(&b"bytes".to_vec()).unwrap_err();
    /// assert_eq!(err.to_string(), "write() argument must be str, not Vec<u8>");
    /// # Ok::<(), text_stream::StreamError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`StreamError::NotText`] naming the rejected type, and
    /// otherwise as [`write`](Self::write) does.
    pub fn write_value<T: Any>(&self, value: &T) -> StreamResult<usize> {
        match text_view(value) {
            Some(text) => self.write(text),
            None => Err(StreamError::NotText {
                type_name: short_type_name::<T>(),
            }),
        }
    }

    fn write_chunk(&self, state: &mut PendingState, chunk: &str) -> StreamResult<()> {
        let encoded = self.encoding.encode(chunk, self.errors)?;
        // Substitutions and shift sequences can outgrow the per-character
        // bound, so an oversized chunk is halved until each piece fits.
        if encoded.len() > MAX_BYTES_PER_RECORD
            && let Some((head, tail)) = split_in_half(chunk)
        {
            self.write_chunk(state, head)?;
            return self.write_chunk(state, tail);
        }
        if state.len + encoded.len() > MAX_BYTES_PER_RECORD {
            self.flush_locked(state)?;
        }

        let ends_line = encoded.ends_with(NEWLINE);
        state.len += encoded.len();
        state.blocks.push(encoded.into_owned());
        if state.write_through || ends_line || state.len > MAX_BYTES_PER_RECORD {
            self.flush_locked(state)?;
        }
        Ok(())
    }

    /// Forwards everything pending as a single record.
    ///
    /// Does nothing when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Sink`] when the platform rejects the record.
    /// The pending bytes are kept so a later flush can retry them.
    pub fn flush(&self) -> StreamResult<()> {
        let mut state = self.lock();
        self.flush_locked(&mut state)
    }

    fn flush_locked(&self, state: &mut PendingState) -> StreamResult<()> {
        if state.blocks.is_empty() {
            return Ok(());
        }

        let record = state.blocks.concat();
        trace_flush(self.sink.tag(), state.blocks.len(), record.len());
        if let Err(error) = self.sink.write(&record) {
            trace_flush_failed(self.sink.tag(), record.len(), &error);
            return Err(error.into());
        }
        state.blocks.clear();
        state.len = 0;
        Ok(())
    }
}

/// Splits `chunk` at its middle character, or returns `None` for a single
/// character.
fn split_in_half(chunk: &str) -> Option<(&str, &str)> {
    let middle = chunk.chars().count() / 2;
    if middle == 0 {
        return None;
    }
    chunk
        .char_indices()
        .nth(middle)
        .map(|(idx, _)| chunk.split_at(idx))
}

fn text_view(value: &dyn Any) -> Option<&str> {
    if let Some(text) = value.downcast_ref::<String>() {
        return Some(text);
    }
    if let Some(text) = value.downcast_ref::<&'static str>() {
        return Some(text);
    }
    if let Some(text) = value.downcast_ref::<Box<str>>() {
        return Some(text);
    }
    value
        .downcast_ref::<Cow<'static, str>>()
        .map(AsRef::as_ref)
}

impl fmt::Write for TextLogStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        TextLogStream::write(self, s).map(drop).map_err(|_| fmt::Error)
    }
}

impl fmt::Write for &TextLogStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        TextLogStream::write(self, s).map(drop).map_err(|_| fmt::Error)
    }
}
