//! Android liblog backend.
//!
//! Records go straight to `__android_log_write`, the same primitive logcat
//! reads from. The platform truncates payloads longer than its entry limit and
//! stops at the first NUL byte, which is why callers go through
//! [`RecordSink`](crate::RecordSink) rather than this writer directly.

use std::io;

use crate::priority::Priority;
use crate::writer::{LogWriter, c_strings};

#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(
        prio: libc::c_int,
        tag: *const libc::c_char,
        text: *const libc::c_char,
    ) -> libc::c_int;
}

/// [`LogWriter`] backed by liblog's `__android_log_write`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AndroidLogWriter;

impl AndroidLogWriter {
    /// Creates the writer. liblog needs no initialisation.
    pub const fn new() -> Self {
        Self
    }
}

impl LogWriter for AndroidLogWriter {
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()> {
        let (tag, text) = c_strings(tag, payload)?;

        // SAFETY: both pointers refer to NUL-terminated strings owned by this
        // frame; liblog copies them before returning.
        let status = unsafe { __android_log_write(priority.as_raw(), tag.as_ptr(), text.as_ptr()) };
        if status < 0 {
            return Err(io::Error::from_raw_os_error(-status));
        }
        Ok(())
    }
}
