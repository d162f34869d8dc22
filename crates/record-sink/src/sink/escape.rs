use std::borrow::Cow;

/// Two-byte "modified UTF-8" encoding of U+0000.
pub const MODIFIED_UTF8_NUL: [u8; 2] = [0xC0, 0x80];

/// Replaces every NUL byte with [`MODIFIED_UTF8_NUL`].
///
/// C-string based log APIs treat an embedded NUL as the end of the message,
/// which would silently truncate the record. Blocks without NUL bytes are
/// returned borrowed.
///
/// # Examples
///
/// ```
/// use record_sink::escape_nul;
///
/// assert_eq!(&*escape_nul(b"a\0b"), b"a\xc0\x80b");
/// assert_eq!(&*escape_nul(b"plain"), b"plain");
/// ```
pub fn escape_nul(block: &[u8]) -> Cow<'_, [u8]> {
    let nul_count = block.iter().filter(|&&b| b == 0).count();
    if nul_count == 0 {
        return Cow::Borrowed(block);
    }

    let mut escaped = Vec::with_capacity(block.len() + nul_count);
    for &byte in block {
        if byte == 0 {
            escaped.extend_from_slice(&MODIFIED_UTF8_NUL);
        } else {
            escaped.push(byte);
        }
    }
    Cow::Owned(escaped)
}

/// Reverses [`escape_nul`], turning every `C0 80` pair back into a NUL byte.
///
/// Consumers that read records back from the platform use this to recover the
/// bytes the caller originally wrote.
pub fn unescape_nul(payload: &[u8]) -> Cow<'_, [u8]> {
    if !payload.windows(2).any(|pair| pair == MODIFIED_UTF8_NUL) {
        return Cow::Borrowed(payload);
    }

    let mut restored = Vec::with_capacity(payload.len());
    let mut rest = payload;
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == MODIFIED_UTF8_NUL[0] && tail.first() == Some(&MODIFIED_UTF8_NUL[1]) {
            restored.push(0);
            rest = &tail[1..];
        } else {
            restored.push(byte);
            rest = tail;
        }
    }
    Cow::Owned(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_without_nul_are_borrowed() {
        assert!(matches!(escape_nul(b"hello"), Cow::Borrowed(_)));
        assert!(matches!(escape_nul(b""), Cow::Borrowed(_)));
    }

    #[test]
    fn every_nul_is_escaped() {
        assert_eq!(&*escape_nul(b"\0"), b"\xc0\x80");
        assert_eq!(&*escape_nul(b"a\0"), b"a\xc0\x80");
        assert_eq!(&*escape_nul(b"\0b"), b"\xc0\x80b");
        assert_eq!(&*escape_nul(b"\0\0"), b"\xc0\x80\xc0\x80");
    }

    #[test]
    fn unescape_restores_nul_bytes() {
        assert_eq!(&*unescape_nul(b"a\xc0\x80b"), b"a\0b");
        assert_eq!(&*unescape_nul(b"\xc0\x80\xc0\x80"), b"\0\0");
    }

    #[test]
    fn unescape_leaves_lone_lead_bytes() {
        assert_eq!(&*unescape_nul(b"\xc0"), b"\xc0");
        assert_eq!(&*unescape_nul(b"\xc0a\x80"), b"\xc0a\x80");
    }
}
