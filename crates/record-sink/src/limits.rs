//! crates/record-sink/src/limits.rs
//! Size limits imposed by the platform log transport.

/// Maximum number of bytes forwarded in a single platform log call.
///
/// Android defines the real ceiling as `LOGGER_ENTRY_MAX_PAYLOAD` in
/// `liblog/include/log/log.h`, counting the priority marker and tag as well as
/// the message. Records longer than that are truncated by logcat. The ceiling
/// has already shrunk once (from 4076 to 4068 between API levels 23 and 26),
/// so this value leaves headroom below it.
pub const MAX_BYTES_PER_RECORD: usize = 4000;

/// Worst-case number of bytes a single character occupies once encoded.
///
/// UTF-8 never needs more than four bytes per scalar value.
pub const MAX_BYTES_PER_CHAR: usize = 4;

/// Maximum number of characters encoded as one chunk.
///
/// A chunk of this many characters can never exceed [`MAX_BYTES_PER_RECORD`]
/// once encoded as UTF-8. Narrower text still coalesces into larger records,
/// because chunks are joined in the text stream's pending buffer.
pub const MAX_CHARS_PER_CHUNK: usize = MAX_BYTES_PER_RECORD / MAX_BYTES_PER_CHAR;
