use std::any::Any;
use std::borrow::Cow;
use std::io;

use super::RecordSink;
use super::escape::escape_nul;
use crate::error::{SinkError, SinkResult, short_type_name};
use crate::trace::{trace_record, trace_record_failed};

impl RecordSink {
    /// Forwards `block` to the platform as a single record.
    ///
    /// Returns the length of `block` itself, not of the escaped payload, so
    /// callers can account for their input without knowing about the
    /// escaping. Writing an empty block has no effect and returns 0. Platform
    /// failures propagate unchanged inside [`SinkError::Platform`].
    pub fn write(&self, block: &[u8]) -> SinkResult<usize> {
        if block.is_empty() {
            return Ok(0);
        }

        let payload = escape_nul(block);
        trace_record(&self.tag, block.len(), payload.len());
        if let Err(error) = self.writer.write_record(self.priority, &self.tag, &payload) {
            trace_record_failed(&self.tag, &error);
            return Err(error.into());
        }
        Ok(block.len())
    }

    /// Writes a dynamically typed value that must be a flat byte sequence.
    ///
    /// Embedding layers that pass untyped values use this entry point. It
    /// accepts `Vec<u8>`, `Box<[u8]>`, `&'static [u8]` and
    /// `Cow<'static, [u8]>`; any other type, text included, fails with
    /// [`SinkError::NotBytesLike`] naming the rejected type.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use record_sink::{Priority, RecordSink, SinkError};
    ///
    /// let sink = RecordSink::new(
    ///     Priority::Info,
    ///     "demo",
    ///     Arc::new(|_: Priority, _: &str, _: &[u8]| -> std::io::Result<()> { Ok(()) }),
    /// );
    ///
    /// assert_eq!(sink.write_value(&b"hello".to_vec())?, 5);
    /// let err = sink.write_value(&String::from("hello")).unwrap_err();
    /// assert_eq!(err.to_string(), "write() argument must be bytes-like, not String");
    /// # Ok::<(), SinkError>(())
    /// ```
    pub fn write_value<T: Any>(&self, value: &T) -> SinkResult<usize> {
        match bytes_view(value) {
            Some(block) => self.write(block),
            None => Err(SinkError::NotBytesLike {
                type_name: short_type_name::<T>(),
            }),
        }
    }
}

fn bytes_view(value: &dyn Any) -> Option<&[u8]> {
    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return Some(bytes);
    }
    if let Some(bytes) = value.downcast_ref::<Box<[u8]>>() {
        return Some(bytes);
    }
    if let Some(bytes) = value.downcast_ref::<&'static [u8]>() {
        return Some(bytes);
    }
    value
        .downcast_ref::<Cow<'static, [u8]>>()
        .map(AsRef::as_ref)
}

impl io::Write for RecordSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RecordSink::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &RecordSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RecordSink::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
