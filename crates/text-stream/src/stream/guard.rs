use super::TextLogStream;

/// RAII guard that temporarily overrides a [`TextLogStream`]'s write-through
/// mode.
///
/// Created by [`TextLogStream::scoped_write_through`]. Dropping the guard
/// restores the mode that was in effect before the call. The guard derefs to
/// the stream so writes can go through it directly.
#[must_use = "dropping the guard immediately restores the previous write-through mode"]
#[derive(Debug)]
pub struct WriteThroughGuard<'a> {
    stream: &'a TextLogStream,
    previous: bool,
    restore: bool,
}

impl<'a> WriteThroughGuard<'a> {
    pub(crate) const fn new(stream: &'a TextLogStream, previous: bool) -> Self {
        Self {
            stream,
            previous,
            restore: true,
        }
    }

    /// Returns the write-through mode that will be restored on drop.
    #[must_use]
    pub const fn previous_write_through(&self) -> bool {
        self.previous
    }

    /// Consumes the guard without restoring the previous mode.
    ///
    /// The scoped mode becomes the stream's new baseline.
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
    /// stream.scoped_write_through(true).into_inner();
    /// assert!(stream.write_through());
    /// ```
    pub fn into_inner(mut self) -> &'a TextLogStream {
        self.restore = false;
        self.stream
    }
}

impl Drop for WriteThroughGuard<'_> {
    fn drop(&mut self) {
        if self.restore {
            self.stream.set_write_through(self.previous);
        }
    }
}

impl std::ops::Deref for WriteThroughGuard<'_> {
    type Target = TextLogStream;

    fn deref(&self) -> &Self::Target {
        self.stream
    }
}
