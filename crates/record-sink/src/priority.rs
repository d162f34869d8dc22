use std::fmt;

/// Log priority levels matching Android's `android_LogPriority` constants.
///
/// Each variant corresponds to an `ANDROID_LOG_*` value from
/// `<android/log.h>`. Backends that target other platforms map these levels to
/// their closest native severity (see [`crate::syslog::SyslogWriter`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(i32)]
pub enum Priority {
    /// Unknown priority (ANDROID_LOG_UNKNOWN).
    Unknown = 0,
    /// Platform default priority (ANDROID_LOG_DEFAULT).
    Default = 1,
    /// Verbose logging (ANDROID_LOG_VERBOSE).
    Verbose = 2,
    /// Debug logging (ANDROID_LOG_DEBUG).
    Debug = 3,
    /// Informational logging (ANDROID_LOG_INFO), the default for stdout.
    Info = 4,
    /// Warning logging (ANDROID_LOG_WARN), the default for stderr.
    Warn = 5,
    /// Error logging (ANDROID_LOG_ERROR).
    Error = 6,
    /// Fatal logging (ANDROID_LOG_FATAL).
    Fatal = 7,
    /// Suppresses output when used as a filter (ANDROID_LOG_SILENT).
    Silent = 8,
}

impl Priority {
    /// Converts a raw platform priority into the matching variant.
    ///
    /// Returns `None` for values outside `0..=8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_sink::Priority;
    ///
    /// assert_eq!(Priority::from_raw(4), Some(Priority::Info));
    /// assert_eq!(Priority::from_raw(42), None);
    /// ```
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Default),
            2 => Some(Self::Verbose),
            3 => Some(Self::Debug),
            4 => Some(Self::Info),
            5 => Some(Self::Warn),
            6 => Some(Self::Error),
            7 => Some(Self::Fatal),
            8 => Some(Self::Silent),
            _ => None,
        }
    }

    /// Returns the raw integer handed to the platform log call.
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Parses a priority name into the corresponding variant.
    ///
    /// Names are case-insensitive. Both the long names returned by
    /// [`as_str`](Self::as_str) and the single-letter codes printed by logcat
    /// (`V`, `D`, `I`, `W`, `E`, `F`, `S`) are accepted.
    ///
    /// Returns `None` for unrecognised names.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_sink::Priority;
    ///
    /// assert_eq!(Priority::from_name("warn"), Some(Priority::Warn));
    /// assert_eq!(Priority::from_name("E"), Some(Priority::Error));
    /// assert_eq!(Priority::from_name("loud"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "default" => Some(Self::Default),
            "verbose" | "v" => Some(Self::Verbose),
            "debug" | "d" => Some(Self::Debug),
            "info" | "i" => Some(Self::Info),
            "warn" | "warning" | "w" => Some(Self::Warn),
            "error" | "e" => Some(Self::Error),
            "fatal" | "f" => Some(Self::Fatal),
            "silent" | "s" => Some(Self::Silent),
            _ => None,
        }
    }

    /// Returns the lowercase priority name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Silent => "silent",
        }
    }

    /// Returns the single-letter code logcat prints in front of the tag.
    pub const fn letter(self) -> char {
        match self {
            Self::Unknown | Self::Default => '?',
            Self::Verbose => 'V',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
            Self::Fatal => 'F',
            Self::Silent => 'S',
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
