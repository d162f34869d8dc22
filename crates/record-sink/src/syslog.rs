//! Syslog backend for hosts without a record-based platform log.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly rather than pulling in a
//! dedicated syslog crate. Each record becomes one syslog(3) entry of the form
//! `"{tag}: {payload}"`, logged with the facility chosen at construction and
//! the severity closest to the record's priority.

use std::ffi::CString;
use std::fmt;
use std::io;
use std::sync::OnceLock;

use crate::priority::Priority;
use crate::writer::{LogWriter, c_strings};

/// Syslog facility codes matching the POSIX syslog(3) constants.
///
/// Each variant corresponds to a `LOG_*` facility from `<syslog.h>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// User-level messages (LOG_USER), the default for application output.
    User = libc::LOG_USER,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Parses a facility name string into the corresponding constant.
    ///
    /// Recognised names are case-insensitive. Returns `None` for unrecognised
    /// names.
    ///
    /// ```
    /// # #[cfg(unix)]
    /// # {
    /// use record_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("kern"), None);
    /// # }
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "daemon" => Some(Self::Daemon),
            "local0" => Some(Self::Local0),
            "local1" => Some(Self::Local1),
            "local2" => Some(Self::Local2),
            "local3" => Some(Self::Local3),
            "local4" => Some(Self::Local4),
            "local5" => Some(Self::Local5),
            "local6" => Some(Self::Local6),
            "local7" => Some(Self::Local7),
            _ => None,
        }
    }

    /// Returns the facility name as accepted by [`from_name`](Self::from_name).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Daemon => "daemon",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl Default for SyslogFacility {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a record priority to the closest syslog(3) severity.
///
/// Returns `None` for [`Priority::Silent`], which never produces an entry.
pub const fn severity(priority: Priority) -> Option<libc::c_int> {
    match priority {
        Priority::Silent => None,
        Priority::Fatal => Some(libc::LOG_CRIT),
        Priority::Error => Some(libc::LOG_ERR),
        Priority::Warn => Some(libc::LOG_WARNING),
        Priority::Unknown | Priority::Default | Priority::Info => Some(libc::LOG_INFO),
        Priority::Debug | Priority::Verbose => Some(libc::LOG_DEBUG),
    }
}

/// Configuration for the syslog connection backing a [`SyslogWriter`].
///
/// Constructing a [`SyslogConfig`] does not open the connection; call
/// [`open`](SyslogConfig::open) to set the process ident and keep the
/// connection alive for the lifetime of the returned guard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    ident: String,
}

impl SyslogConfig {
    /// Creates a new syslog configuration with the given facility and ident.
    pub fn new(facility: SyslogFacility, ident: impl Into<String>) -> Self {
        Self {
            facility,
            ident: ident.into(),
        }
    }

    /// Returns the configured syslog facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured ident string.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Returns a writer that logs records to this configuration's facility.
    pub const fn writer(&self) -> SyslogWriter {
        SyslogWriter {
            facility: self.facility,
        }
    }

    /// Opens the syslog connection with the configured facility and ident.
    ///
    /// Only the first ident passed to `open` in a process is retained, because
    /// syslog(3) keeps the pointer for the lifetime of the process.
    pub fn open(&self) -> SyslogGuard {
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            CString::new(self.ident.replace('\0', "")).unwrap_or_default()
        });

        // SAFETY: the ident pointer stays valid for the process lifetime
        // because it lives in a static `OnceLock<CString>`.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }

        SyslogGuard { _private: () }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), "logcat-stream")
    }
}

/// [`LogWriter`] that emits each record as one syslog(3) entry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SyslogWriter {
    facility: SyslogFacility,
}

impl SyslogWriter {
    /// Creates a writer for `facility` without opening a connection.
    ///
    /// syslog(3) connects lazily on the first entry when no
    /// [`SyslogConfig::open`] call preceded it.
    pub const fn new(facility: SyslogFacility) -> Self {
        Self { facility }
    }

    /// Returns the facility every entry is logged under.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }
}

impl LogWriter for SyslogWriter {
    fn write_record(&self, priority: Priority, tag: &str, payload: &[u8]) -> io::Result<()> {
        let Some(level) = severity(priority) else {
            return Ok(());
        };
        let (tag, message) = c_strings(tag, payload)?;

        // `%s` placeholders keep `%` in the tag or payload from being read as
        // format directives.
        // SAFETY: the format string and both arguments are valid NUL-terminated
        // C strings that outlive the call.
        unsafe {
            libc::syslog(
                self.facility as libc::c_int | level,
                c"%s: %s".as_ptr(),
                tag.as_ptr(),
                message.as_ptr(),
            );
        }
        Ok(())
    }
}

/// RAII guard that closes the syslog connection when dropped.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions beyond a prior openlog, which
        // the guard's construction guarantees.
        unsafe {
            libc::closelog();
        }
    }
}
